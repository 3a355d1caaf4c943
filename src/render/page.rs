//! The single application page: claim form on the left, analysis state on
//! the right.

use super::escape_html;
use super::result_view::render_result;
use crate::config::{APP_NAME, APP_VERSION};
use crate::core_state::AnalysisState;
use crate::form::{required_fields, visible_fields, ClaimForm, FormError, FormField};
use crate::models::{ClaimStatus, SpiIssue};

const SUBMIT_LABEL: &str = "Lakukan Analisis &amp; Jurnal Akuntansi";
const BUSY_LABEL: &str = "Sedang Menganalisis...";

/// Everything the page needs, borrowed from the current state.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub draft: &'a ClaimForm,
    pub state: &'a AnalysisState,
    /// Rejections from the last submit, shown above the form.
    pub form_errors: Option<&'a FormError>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{app_name} &middot; Agen Kepatuhan Finansial BLUD</title>
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#f8fafc;color:#0f172a}}
header{{background:#0f172a;color:#fff;padding:16px 24px;display:flex;align-items:baseline;gap:12px}}
header .brand{{font-weight:700;font-size:1.125rem}}
header .tagline{{color:#94a3b8;font-size:.8rem}}
main{{max-width:1200px;margin:0 auto;padding:24px}}
h1{{font-size:1.5rem;margin:0 0 4px}}
.lead{{color:#64748b;margin:0 0 24px;font-size:.9rem}}
.layout{{display:grid;grid-template-columns:minmax(280px,1fr) 2fr;gap:24px;align-items:start}}
@media (max-width:900px){{.layout{{grid-template-columns:1fr}}}}
.card{{background:#fff;border:1px solid #e2e8f0;border-radius:12px;padding:20px;margin-bottom:16px}}
.card-title{{margin:0 0 16px;font-size:1rem}}
label{{display:block;font-size:.8rem;font-weight:600;color:#334155;margin-bottom:12px}}
input,select{{display:block;width:100%;margin-top:4px;padding:10px;border:1px solid #cbd5e1;border-radius:8px;font-size:.9rem}}
.btn{{display:block;width:100%;padding:12px;border:none;border-radius:8px;background:#4f46e5;color:#fff;font-weight:600;font-size:.9rem;cursor:pointer}}
.btn:disabled{{background:#94a3b8;cursor:not-allowed}}
.hidden{{display:none}}
.grid-2{{display:grid;grid-template-columns:1fr 1fr;gap:16px}}
@media (max-width:700px){{.grid-2{{grid-template-columns:1fr}}}}
.box{{border-radius:8px;padding:12px;font-size:.875rem}}
.box h4{{margin:0 0 8px;font-size:.8rem}}
.box-risk{{background:#fef2f2;border:1px solid #fecaca}}
.box-action{{background:#eff6ff;border:1px solid #bfdbfe}}
.unit{{font-size:.8rem;color:#475569}}
.ledger{{width:100%;border-collapse:collapse;font-size:.85rem}}
.ledger th,.ledger td{{padding:8px;border-bottom:1px solid #e2e8f0;text-align:left}}
.ledger .num{{text-align:right;font-family:ui-monospace,monospace}}
.credit-side .account{{padding-left:32px}}
.journal-description{{font-size:.85rem;color:#475569}}
.impact-list h4{{margin:0 0 8px;font-size:.85rem}}
.impact-list ul{{list-style:none;margin:0;padding:0}}
.impact-item{{display:flex;justify-content:space-between;gap:12px;padding:8px 0;border-bottom:1px solid #f1f5f9}}
.impact-name{{margin:0;font-weight:600;font-size:.85rem}}
.impact-desc{{margin:2px 0 0;font-size:.75rem;color:#64748b}}
.delta{{font-family:ui-monospace,monospace;font-weight:700;white-space:nowrap}}
.delta-up{{color:#16a34a}}
.delta-down{{color:#dc2626}}
.footnote{{font-size:.75rem;color:#64748b;font-style:italic;margin:12px 0 0}}
.notice{{border-radius:8px;padding:12px;font-size:.85rem;margin:12px 0}}
.notice-warning{{background:#fffbeb;border:1px solid #fde68a;color:#92400e}}
.notice-error{{background:#fef2f2;border:1px solid #fecaca;color:#991b1b}}
.notice ul{{margin:0;padding-left:18px}}
.placeholder{{text-align:center;padding:48px 24px;color:#64748b;border:2px dashed #cbd5e1;border-radius:12px}}
.placeholder h3{{color:#334155}}
.loading{{text-align:center;padding:48px 24px;color:#4f46e5}}
.spinner{{width:40px;height:40px;margin:0 auto 16px;border:4px solid #e0e7ff;border-top-color:#4f46e5;border-radius:50%;animation:spin 1s linear infinite}}
@keyframes spin{{to{{transform:rotate(360deg)}}}}
footer{{text-align:center;color:#94a3b8;font-size:.75rem;padding:24px}}
</style>
</head>
<body>
<header><span class="brand">FICS Agent</span><span class="tagline">Financial Compliance &amp; SIA Reporting</span></header>
<main>
<h1>Agen Kepatuhan Finansial BLUD</h1>
<p class="lead">Diagnosis kendala SPI, simulasi jurnal akrual, dan dampak laporan keuangan untuk klaim rumah sakit.</p>
<div class="layout">
{form}
<div id="state-view">
{state_view}
</div>
</div>
</main>
<footer>{app_name} v{version}</footer>
<template id="loading-view">{loading_view}</template>
<script>
(function(){{
  var status=document.getElementById('status');
  var spiFields=document.getElementById('spi-fields');
  var spiSelect=document.getElementById('spiIssue');
  function sync(){{
    var approved=status.value==='{approved}';
    spiFields.classList.toggle('hidden',approved);
    spiSelect.required=!approved;
  }}
  status.addEventListener('change',sync);
  sync();
  document.getElementById('claim-form').addEventListener('submit',function(){{
    var btn=document.getElementById('submit-btn');
    btn.disabled=true;
    btn.textContent='{busy_label}';
    document.getElementById('state-view').innerHTML=document.getElementById('loading-view').innerHTML;
  }});
}})();
</script>
</body>
</html>"##,
        app_name = APP_NAME,
        version = APP_VERSION,
        form = render_form(view),
        state_view = render_state(view.state),
        loading_view = loading_view(),
        approved = ClaimStatus::Approved.code(),
        busy_label = BUSY_LABEL,
    )
}

fn render_form(view: &PageView<'_>) -> String {
    let draft = view.draft;
    let status = draft.selected_status();
    let spi_visible = visible_fields(status).contains(&FormField::SpiIssue);
    let spi_required = required_fields(status).contains(&FormField::SpiIssue);
    let busy = view.state.is_loading();

    let errors = match view.form_errors {
        Some(err) if !err.0.is_empty() => {
            let items: String = err
                .0
                .iter()
                .map(|e| format!("<li data-field=\"{}\">{}</li>", e.field.name(), escape_html(&e.message)))
                .collect();
            format!("<div class=\"notice notice-error\" role=\"alert\"><ul>{items}</ul></div>")
        }
        _ => String::new(),
    };

    let status_options: String = ClaimStatus::ALL
        .iter()
        .map(|s| option(s.code(), s.label(), draft.status == s.code()))
        .collect();

    let selected_issue = draft.selected_spi_issue();
    let spi_options: String = std::iter::once(option("", "-- Pilih Kendala --", selected_issue.is_none()))
        .chain(
            SpiIssue::ALL
                .iter()
                .map(|i| option(i.code(), i.label(), selected_issue == Some(*i))),
        )
        .collect();

    format!(
        r##"<form class="card" method="post" action="/analyze" id="claim-form">
  <h2 class="card-title">Input Data Klaim (SIA)</h2>
  {errors}
  <label>ID Transaksi / No. Klaim
    <input type="text" name="transactionId" placeholder="CONTOH: KLAIM-2023-001" value="{transaction_id}" required>
  </label>
  <label>Nilai Total Klaim (IDR)
    <input type="number" name="amount" min="0" step="any" value="{amount}" required>
  </label>
  <label>Status Klaim Saat Ini
    <select name="status" id="status">{status_options}</select>
  </label>
  <div id="spi-fields"{spi_class}>
    <label>Kategori Kendala SPI (Wajib)
      <select name="spiIssue" id="spiIssue"{spi_required}>{spi_options}</select>
    </label>
    <label>Batas Waktu Perbaikan (Hari)
      <input type="number" name="deadlineDays" min="0" step="1" value="{deadline_days}">
    </label>
  </div>
  <button type="submit" class="btn" id="submit-btn"{disabled}>{button_label}</button>
</form>"##,
        transaction_id = escape_html(&draft.transaction_id),
        amount = escape_html(&draft.amount),
        deadline_days = escape_html(&draft.deadline_days),
        spi_class = if spi_visible { "" } else { r#" class="hidden""# },
        spi_required = if spi_required { " required" } else { "" },
        disabled = if busy { " disabled" } else { "" },
        button_label = if busy { BUSY_LABEL } else { SUBMIT_LABEL },
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn render_state(state: &AnalysisState) -> String {
    match state {
        AnalysisState::Idle => r##"<div class="placeholder">
  <h3>Siap Menganalisis</h3>
  <p>Masukkan data klaim di sebelah kiri untuk memulai simulasi akuntansi.</p>
</div>"##
            .to_string(),
        AnalysisState::Loading { .. } => loading_view().to_string(),
        AnalysisState::Failure { message, .. } => format!(
            "<div class=\"notice notice-error\" role=\"alert\">{}</div>",
            escape_html(message)
        ),
        AnalysisState::Success { result, .. } => render_result(result),
    }
}

fn loading_view() -> &'static str {
    r##"<div class="loading">
  <div class="spinner"></div>
  <p>Sedang menganalisis kepatuhan SPI &amp; menghitung akrual...</p>
</div>"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::FAILURE_MESSAGE;
    use crate::form::FieldError;
    use crate::models::analysis::fixtures::pending_claim_result;
    use chrono::Utc;
    use uuid::Uuid;

    fn page(draft: &ClaimForm, state: &AnalysisState) -> String {
        render_page(&PageView {
            draft,
            state,
            form_errors: None,
        })
    }

    /// The markup between the state-view container and the closing layout.
    fn state_section(html: &str) -> &str {
        let start = html.find("<div id=\"state-view\">").unwrap();
        let end = html.find("<footer>").unwrap();
        &html[start..end]
    }

    #[test]
    fn idle_page_shows_form_and_placeholder() {
        let html = page(&ClaimForm::default(), &AnalysisState::Idle);
        assert!(html.contains("Input Data Klaim (SIA)"));
        assert!(html.contains("Siap Menganalisis"));
        assert!(html.contains("Lakukan Analisis &amp; Jurnal Akuntansi"));
        assert!(html.contains("<option value=\"PENDING\" selected>Pending (Tertunda)</option>"));
        assert!(html.contains("<option value=\"\" selected>-- Pilih Kendala --</option>"));
        assert!(html.contains("name=\"deadlineDays\" min=\"0\" step=\"1\" value=\"10\""));
    }

    #[test]
    fn pending_draft_shows_and_requires_spi_issue() {
        let html = page(&ClaimForm::default(), &AnalysisState::Idle);
        assert!(html.contains("<div id=\"spi-fields\">"));
        assert!(html.contains("<select name=\"spiIssue\" id=\"spiIssue\" required>"));
    }

    #[test]
    fn approved_draft_hides_spi_fields() {
        let draft = ClaimForm {
            status: "APPROVED".into(),
            ..ClaimForm::default()
        };
        let html = page(&draft, &AnalysisState::Idle);
        assert!(html.contains("<div id=\"spi-fields\" class=\"hidden\">"));
        assert!(html.contains("<select name=\"spiIssue\" id=\"spiIssue\">"));
    }

    #[test]
    fn loading_disables_submit() {
        let state = AnalysisState::Loading {
            submission_id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        let html = page(&ClaimForm::default(), &state);
        assert!(html.contains("id=\"submit-btn\" disabled>Sedang Menganalisis...</button>"));
        assert!(state_section(&html).contains("Sedang menganalisis kepatuhan SPI"));
    }

    #[test]
    fn failure_shows_fixed_message_only() {
        let state = AnalysisState::Failure {
            submission_id: Uuid::new_v4(),
            message: FAILURE_MESSAGE.into(),
            failed_at: Utc::now(),
        };
        let html = page(&ClaimForm::default(), &state);
        let section = state_section(&html);
        assert!(section.contains(FAILURE_MESSAGE));
        assert!(!section.contains("Siap Menganalisis"));
        assert!(!section.contains("2. Simulasi Jurnal Akuntansi"));
    }

    #[test]
    fn success_embeds_result() {
        let state = AnalysisState::Success {
            submission_id: Uuid::new_v4(),
            result: pending_claim_result(),
            completed_at: Utc::now(),
        };
        let html = page(&ClaimForm::default(), &state);
        let section = state_section(&html);
        assert!(section.contains("1. Diagnosis Kendala SPI"));
        assert!(section.contains("Unit Rekam Medis"));
        assert!(html.contains("id=\"submit-btn\">Lakukan Analisis"));
    }

    #[test]
    fn draft_values_are_escaped_and_kept() {
        let draft = ClaimForm {
            transaction_id: "\"><script>x</script>".into(),
            amount: "1500".into(),
            status: "DENIED".into(),
            spi_issue: "CODING".into(),
            deadline_days: "3".into(),
        };
        let html = page(&draft, &AnalysisState::Idle);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;x&lt;/script&gt;\""));
        assert!(html.contains("value=\"1500\""));
        assert!(html.contains("<option value=\"DENIED\" selected>"));
        assert!(html.contains("<option value=\"CODING\" selected>"));
    }

    #[test]
    fn form_errors_listed() {
        let errors = FormError(vec![FieldError {
            field: FormField::SpiIssue,
            message: "Kategori kendala SPI wajib dipilih.".into(),
        }]);
        let html = render_page(&PageView {
            draft: &ClaimForm::default(),
            state: &AnalysisState::Idle,
            form_errors: Some(&errors),
        });
        assert!(html.contains("<li data-field=\"spiIssue\">Kategori kendala SPI wajib dipilih.</li>"));
    }

    #[test]
    fn page_render_is_idempotent() {
        let state = AnalysisState::Success {
            submission_id: Uuid::nil(),
            result: pending_claim_result(),
            completed_at: Utc::now(),
        };
        let draft = ClaimForm::default();
        assert_eq!(page(&draft, &state), page(&draft, &state));
    }
}
