//! Structured-output schema sent with every analysis request.
//!
//! Mirrors `crate::models::AnalysisResult` field for field, in the OpenAPI
//! subset the Gemini `responseSchema` accepts. Debit/credit are the only
//! nullable fields; `direction` is a closed enumeration.

use std::sync::OnceLock;

use serde_json::{json, Value};

use crate::models::ImpactDirection;

static RESPONSE_SCHEMA: OnceLock<Value> = OnceLock::new();

/// The strict response schema (built once).
pub fn analysis_response_schema() -> &'static Value {
    RESPONSE_SCHEMA.get_or_init(build_schema)
}

fn impact_item_schema() -> Value {
    let directions: Vec<&str> = ImpactDirection::ALL.iter().map(|d| d.code()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "category": { "type": "STRING" },
            "item": { "type": "STRING" },
            "impactDescription": { "type": "STRING" },
            "amount": { "type": "NUMBER" },
            "direction": { "type": "STRING", "enum": directions }
        },
        "required": ["category", "item", "impactDescription", "amount", "direction"]
    })
}

fn build_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "diagnosis": {
                "type": "OBJECT",
                "properties": {
                    "riskAnalysis": {
                        "type": "STRING",
                        "description": "Analisis risiko finansial (Delayed Revenue/Uncollectible)"
                    },
                    "correctiveAction": {
                        "type": "STRING",
                        "description": "Langkah korektif spesifik sesuai SPI"
                    },
                    "responsibleUnit": {
                        "type": "STRING",
                        "description": "Unit yang bertanggung jawab (Koder/Keuangan/Admisi)"
                    }
                },
                "required": ["riskAnalysis", "correctiveAction", "responsibleUnit"]
            },
            "journalSimulation": {
                "type": "OBJECT",
                "properties": {
                    "description": {
                        "type": "STRING",
                        "description": "Penjelasan konteks jurnal akrual PSAP 13"
                    },
                    "entries": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "accountName": { "type": "STRING" },
                                "debit": { "type": "NUMBER", "nullable": true },
                                "credit": { "type": "NUMBER", "nullable": true }
                            },
                            "required": ["accountName"]
                        }
                    },
                    "isBadDebt": { "type": "BOOLEAN" }
                },
                "required": ["description", "entries", "isBadDebt"]
            },
            "financialReporting": {
                "type": "OBJECT",
                "properties": {
                    "balanceSheet": { "type": "ARRAY", "items": impact_item_schema() },
                    "operationalReport": { "type": "ARRAY", "items": impact_item_schema() },
                    "note": { "type": "STRING" }
                },
                "required": ["balanceSheet", "operationalReport", "note"]
            }
        },
        "required": ["diagnosis", "journalSimulation", "financialReporting"]
    })
}
