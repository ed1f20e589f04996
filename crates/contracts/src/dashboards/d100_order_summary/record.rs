use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::lenient;

/// Lifecycle stage of an order record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    Open,
    Tentative,
    Quoted,
    Confirmed,
}

impl OrderKind {
    /// Code used in query parameters and JSON
    pub fn code(&self) -> &'static str {
        match self {
            OrderKind::Open => "open",
            OrderKind::Tentative => "tentative",
            OrderKind::Quoted => "quoted",
            OrderKind::Confirmed => "confirmed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderKind::Open => "Open Orders",
            OrderKind::Tentative => "Tentative Orders",
            OrderKind::Quoted => "Quoted Orders",
            OrderKind::Confirmed => "Confirmed Orders",
        }
    }

    pub fn all() -> Vec<OrderKind> {
        vec![
            OrderKind::Open,
            OrderKind::Tentative,
            OrderKind::Quoted,
            OrderKind::Confirmed,
        ]
    }

    /// Parse from code, case-insensitive
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "open" => Some(OrderKind::Open),
            "tentative" => Some(OrderKind::Tentative),
            "quoted" => Some(OrderKind::Quoted),
            "confirmed" => Some(OrderKind::Confirmed),
            _ => None,
        }
    }

    /// Infer the lifecycle stage from which fields are populated.
    ///
    /// Used only for payloads of unknown origin; records fetched from a
    /// known endpoint get their kind at ingestion. Checks run in order:
    /// confirmed, open, quoted, tentative.
    pub fn detect(fields: &OrderFields) -> Option<Self> {
        if fields.total_value.is_some() && fields.design_category.is_some() {
            return Some(OrderKind::Confirmed);
        }
        // Presence is enough, even `null` or unreadable
        if fields.p_layout.is_some() || fields.extra.contains_key("playout") {
            return Some(OrderKind::Open);
        }
        if fields.quoted_value.unwrap_or(0.0) > 0.0 {
            return Some(OrderKind::Quoted);
        }
        if fields.tentative_value.unwrap_or(0.0) > 0.0 {
            return Some(OrderKind::Tentative);
        }
        None
    }
}

/// Every field the classifier looks at, all optional.
///
/// JSON names follow the ERP payload. Fields the classifier does not read
/// are kept in `extra` so the record can be handed back to table renderers.
/// Known fields whose value cannot be read (`null`, wrong type) are kept in
/// `extra` with their raw value; readable numeric strings come back as numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFields {
    #[serde(rename = "type", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,

    #[serde(rename = "enquirytype", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub enquiry_type: Option<String>,

    /// Free-text work description
    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(rename = "designcategory", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub design_category: Option<String>,

    /// 1 = INR (domestic), anything else = export
    #[serde(default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<f64>,

    // Open order progress amounts
    #[serde(rename = "playout", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub p_layout: Option<f64>,

    #[serde(rename = "panalysis", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub p_analysis: Option<f64>,

    #[serde(rename = "pVA", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub p_va: Option<f64>,

    #[serde(rename = "pNPI", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub p_npi: Option<f64>,

    // Amounts per lifecycle stage
    #[serde(rename = "TotalValue", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub total_value: Option<f64>,

    #[serde(rename = "QuotedValue", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub quoted_value: Option<f64>,

    #[serde(rename = "TentativeValue", default, deserialize_with = "lenient::deserialize_number", skip_serializing_if = "Option::is_none")]
    pub tentative_value: Option<f64>,

    // Layout flags ("YES" / anything else)
    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub design: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub layout_others: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub dfm: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub dfa: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub qacam: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    // Analysis flags
    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub si: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub pi: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub emi_net_level: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub emi_system_level: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub thermal_board_level: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub thermal_system_level: Option<String>,

    // VA flags
    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub asmb: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub fpg: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub hardware_testing: Option<String>,

    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub hardware_others: Option<String>,

    #[serde(rename = "DesignOutSource", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub design_out_source: Option<String>,

    // NPI flags
    #[serde(rename = "NPINew_BOMProc", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub npi_bom_proc: Option<String>,

    #[serde(rename = "NPINew_Fab", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub npi_fab: Option<String>,

    #[serde(rename = "NPINew_Assbly", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub npi_assembly: Option<String>,

    #[serde(rename = "NPINew_JobWork", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub npi_job_work: Option<String>,

    #[serde(rename = "NPINew_Testing", default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub npi_testing: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrderFields {
    /// Read a JSON object; `None` for arrays, scalars and `null`
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut fields: Self = serde_json::from_value(value.clone()).ok()?;
        fields.keep_unread(object);
        Some(fields)
    }

    /// Put members the lenient readers dropped back into `extra`
    fn keep_unread(&mut self, object: &Map<String, Value>) {
        let Ok(Value::Object(read)) = serde_json::to_value(&*self) else {
            return;
        };
        for (name, raw) in object {
            if !read.contains_key(name) {
                self.extra.insert(name.clone(), raw.clone());
            }
        }
    }
}

/// Order record tagged with its lifecycle stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub kind: OrderKind,
    #[serde(flatten)]
    pub fields: OrderFields,
}

impl OrderRecord {
    pub fn new(kind: OrderKind, fields: OrderFields) -> Self {
        Self { kind, fields }
    }

    /// Wrap a raw element of an upstream array whose kind is known
    pub fn ingest(kind: OrderKind, value: &Value) -> Option<Self> {
        let mut fields = OrderFields::from_value(value)?;
        fields.extra.remove("kind");
        Some(Self::new(kind, fields))
    }

    /// Wrap a raw element of unknown origin.
    ///
    /// An explicit `"kind"` member wins; otherwise the kind is inferred
    /// with [`OrderKind::detect`].
    pub fn ingest_detected(value: &Value) -> Option<Self> {
        let explicit = value
            .get("kind")
            .and_then(Value::as_str)
            .and_then(OrderKind::from_code);
        let mut fields = OrderFields::from_value(value)?;
        fields.extra.remove("kind");
        let kind = explicit.or_else(|| OrderKind::detect(&fields))?;
        Some(Self::new(kind, fields))
    }
}
