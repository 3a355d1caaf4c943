use crate::models::ClaimData;

/// Role and task framing for the reasoning service.
pub const ANALYST_ROLE: &str = "Bertindaklah sebagai Profesor Sistem Informasi Akuntansi (AIS) dan Agen FICS (Financial Compliance & SIA Reporting Agent).";

const TASKS: &str = r#"Tugas:
1. Lakukan diagnosis kendala SPI dan berikan rekomendasi perbaikan.
2. Simulasikan jurnal akuntansi berbasis AKRUAL (PSAP 13). Jika status Pending/Gagal Bayar, akui Piutang dan Pendapatan-LO. Jika Gagal Bayar, pertimbangkan penyisihan piutang.
3. Analisis dampak pada Neraca (Aset, Ekuitas) dan Laporan Operasional (Pendapatan-LO).

Berikan output dalam format JSON yang valid sesuai skema. Bahasa Indonesia Formal."#;

/// Build the analysis instruction for one claim.
///
/// All five claim fields are embedded verbatim; enumerations use their
/// canonical labels so the model sees the same values the form offers.
pub fn build_analysis_prompt(claim: &ClaimData) -> String {
    format!(
        r#"{ANALYST_ROLE}

Analisis data klaim rumah sakit (BLUD) berikut:
ID Transaksi: {transaction_id}
Nilai Klaim: IDR {amount}
Status: {status}
Kendala SPI: {spi_issue}
Sisa Waktu: {deadline_days} hari.

{TASKS}
"#,
        transaction_id = claim.transaction_id,
        amount = claim.amount,
        status = claim.status.label(),
        spi_issue = claim.spi_issue_label(),
        deadline_days = claim.deadline_days,
    )
}
