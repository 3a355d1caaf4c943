use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a form value or wire code names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} value: '{value}'")]
pub struct InvalidEnum {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate a closed enum with a wire code, a display label,
/// and the std::str::FromStr pattern over the code.
macro_rules! coded_enum {
    ($name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Wire/form value.
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Canonical label shown in the UI and embedded in the prompt.
            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant)),+,
                    _ => None,
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s).ok_or_else(|| InvalidEnum {
                    field: stringify!($name),
                    value: s.into(),
                })
            }
        }
    };
}

coded_enum!(ClaimStatus {
    Approved => ("APPROVED", "Layak Bayar (Approved/Clear)"),
    Pending => ("PENDING", "Pending (Tertunda)"),
    Denied => ("DENIED", "Gagal Bayar (Denied/Ditolak)"),
});

coded_enum!(SpiIssue {
    Technical => ("TECHNICAL", "Kendala Teknis E-Klaim Error"),
    Coding => ("CODING", "Ketidaksesuaian Koding (ICD-10/ICD 9-CM)"),
    Docs => ("DOCS", "Dokumen Medis/Resume Tidak Lengkap"),
    NonCovered => ("NON_COVERED", "Klaim Tidak Ditanggung (Non-Gawat Darurat/Estetika)"),
});

coded_enum!(ImpactDirection {
    Increase => ("increase", "Naik"),
    Decrease => ("decrease", "Turun"),
    Neutral => ("neutral", "Tetap"),
});

impl ClaimStatus {
    /// Pending and Denied claims carry an SPI issue and a correction deadline.
    pub fn requires_spi_issue(&self) -> bool {
        !matches!(self, Self::Approved)
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ImpactDirection {
    /// Sign prefix used when rendering a monetary delta. Only an increase
    /// is positive; neutral renders like a decrease.
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Increase => "+",
            Self::Decrease | Self::Neutral => "-",
        }
    }
}
