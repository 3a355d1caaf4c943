//! Read-only view of one `AnalysisResult`: diagnosis, journal simulation and
//! financial statement impact.

use super::currency::{format_ledger_cell, format_signed_idr};
use super::escape_html;
use crate::models::{AnalysisResult, FinancialImpactItem, ImpactDirection, JournalSimulation};

pub const BAD_DEBT_NOTICE: &str = "Perhatian: Karena status Gagal Bayar, disarankan untuk mempertimbangkan pembentukan Cadangan Kerugian Piutang sesuai kebijakan akuntansi BLUD.";

/// Render the three result sections. Values are shown exactly as returned;
/// nothing is recomputed or cross-checked.
pub fn render_result(result: &AnalysisResult) -> String {
    let diagnosis = &result.diagnosis;
    let reporting = &result.financial_reporting;

    format!(
        r##"<div class="result">
<section class="card" id="diagnosis">
  <h3 class="card-title">1. Diagnosis Kendala SPI &amp; Rekomendasi</h3>
  <div class="grid-2">
    <div class="box box-risk">
      <h4>Analisis Risiko Finansial</h4>
      <p>{risk}</p>
    </div>
    <div class="box box-action">
      <h4>Tindakan Korektif</h4>
      <p>{action}</p>
      <p class="unit">Unit Penanggung Jawab: <strong>{unit}</strong></p>
    </div>
  </div>
</section>
<section class="card" id="journal">
  <h3 class="card-title">2. Simulasi Jurnal Akuntansi (Basis Akrual - PSAP 13)</h3>
{journal}
</section>
<section class="card" id="impact">
  <h3 class="card-title">3. Dampak Laporan Keuangan BLUD</h3>
  <div class="grid-2">
{balance_sheet}
{operational_report}
  </div>
  <p class="footnote">Catatan: {note}</p>
</section>
</div>"##,
        risk = escape_html(&diagnosis.risk_analysis),
        action = escape_html(&diagnosis.corrective_action),
        unit = escape_html(&diagnosis.responsible_unit),
        journal = render_journal(&result.journal_simulation),
        balance_sheet = render_impact_list(
            "balance-sheet",
            "Laporan Neraca (Posisi Keuangan)",
            &reporting.balance_sheet
        ),
        operational_report = render_impact_list(
            "operational-report",
            "Laporan Operasional (LO)",
            &reporting.operational_report
        ),
        note = escape_html(&reporting.note),
    )
}

fn render_journal(journal: &JournalSimulation) -> String {
    let rows: String = journal
        .entries
        .iter()
        .map(|line| {
            // Lines without a debit are credit postings, indented under the debits.
            let class = if line.is_debit() {
                "journal-row"
            } else {
                "journal-row credit-side"
            };
            format!(
                "      <tr class=\"{class}\"><td class=\"account\">{account}</td><td class=\"num\">{debit}</td><td class=\"num\">{credit}</td></tr>\n",
                account = escape_html(&line.account_name),
                debit = format_ledger_cell(line.debit),
                credit = format_ledger_cell(line.credit),
            )
        })
        .collect();

    let notice = if journal.is_bad_debt {
        format!("  <div class=\"notice notice-warning\" role=\"alert\">{BAD_DEBT_NOTICE}</div>\n")
    } else {
        String::new()
    };

    format!(
        r##"  <p class="journal-description">{description}</p>
  <table class="ledger">
    <thead><tr><th>Nama Akun</th><th class="num">Debit (IDR)</th><th class="num">Kredit (IDR)</th></tr></thead>
    <tbody>
{rows}    </tbody>
  </table>
{notice}"##,
        description = escape_html(&journal.description),
    )
}

fn render_impact_list(id: &str, title: &str, items: &[FinancialImpactItem]) -> String {
    let rendered: String = items
        .iter()
        .map(|item| {
            format!(
                "      <li class=\"impact-item\"><div><p class=\"impact-name\">{name}</p><p class=\"impact-desc\">{desc}</p></div><span class=\"delta {tone}\">{delta}</span></li>\n",
                name = escape_html(&item.item),
                desc = escape_html(&item.impact_description),
                tone = direction_class(item.direction),
                delta = format_signed_idr(item.amount, item.direction),
            )
        })
        .collect();

    format!(
        r##"    <div class="impact-list" id="{id}">
      <h4>{title}</h4>
      <ul>
{rendered}      </ul>
    </div>"##
    )
}

fn direction_class(direction: ImpactDirection) -> &'static str {
    match direction {
        ImpactDirection::Increase => "delta-up",
        ImpactDirection::Decrease | ImpactDirection::Neutral => "delta-down",
    }
}
