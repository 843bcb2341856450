// 💱 Amount Normalizer - one canonical shape for every ledger amount
//
// The ledger speaks two dialects:
// - Native asset: a plain string of drops ("1000000")
// - Issued asset: { "currency": "USD", "issuer": "r...", "value": "1.5" }
//
// Issued currency codes may also be 40-character hex blobs (non-standard
// codes, demurrage codes). Everything leaving this module is displayable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Native asset code used when no network configuration is supplied
pub const NATIVE_CURRENCY: &str = "XRP";

/// Sentinel for currency codes that are neither standard nor valid hex
pub const UNKNOWN_CURRENCY: &str = "???";

/// Drops per one unit of the native asset
pub const DROPS_PER_NATIVE: u64 = 1_000_000;

/// Seconds in a (non-leap) year, used by demurrage rate display
const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Length of a hex-encoded 160-bit currency code
const HEX_CURRENCY_LEN: usize = 40;

// ============================================================================
// CANONICAL AMOUNT
// ============================================================================

/// CanonicalAmount - the only amount shape the rest of the crate sees
///
/// `currency` is always safe to show to a human. `code` keeps the on-ledger
/// currency code so the amount can be written back in protocol shape
/// (see `AmountNormalizer::to_raw`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalAmount {
    /// Decimal string as found in the payload (drops for the native asset).
    /// Empty when the payload carried no value.
    pub value: String,

    /// Display currency code
    pub currency: String,

    /// Issuer address for issued assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Currency code exactly as stored on ledger
    pub code: String,
}

impl CanonicalAmount {
    /// True when this amount is denominated in the native asset
    pub fn is_native(&self, native_currency: &str) -> bool {
        self.issuer.is_none() && self.code == native_currency
    }

    /// True when the currency could not be made sense of
    pub fn is_unknown_currency(&self) -> bool {
        self.currency == UNKNOWN_CURRENCY
    }

    /// Parse the value as a decimal (plain or scientific notation)
    pub fn decimal_value(&self) -> Option<Decimal> {
        parse_decimal(&self.value)
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// AmountNormalizer - carries the network's native asset code
///
/// Cheap to clone; every entity keeps one so its monetary accessors can
/// normalize lazily.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountNormalizer {
    native_currency: String,
}

impl AmountNormalizer {
    pub fn new(native_currency: impl Into<String>) -> Self {
        AmountNormalizer {
            native_currency: native_currency.into(),
        }
    }

    pub fn native_currency(&self) -> &str {
        &self.native_currency
    }

    /// Convert any raw amount into a CanonicalAmount. Never fails.
    pub fn normalize(&self, raw: &Value) -> CanonicalAmount {
        match raw {
            Value::String(drops) => self.native(drops.clone()),
            Value::Number(drops) => self.native(drops.to_string()),
            Value::Object(record) => {
                let code = record
                    .get("currency")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();

                let value = match record.get("value") {
                    Some(Value::String(v)) => v.clone(),
                    Some(Value::Number(v)) => v.to_string(),
                    _ => String::new(),
                };

                let issuer = record
                    .get("issuer")
                    .and_then(Value::as_str)
                    .map(str::to_string);

                CanonicalAmount {
                    value,
                    currency: self.normalize_currency(&code),
                    issuer,
                    code,
                }
            }
            other => {
                tracing::debug!(raw = %other, "amount is neither drops nor an issued record");
                CanonicalAmount {
                    value: String::new(),
                    currency: UNKNOWN_CURRENCY.to_string(),
                    issuer: None,
                    code: String::new(),
                }
            }
        }
    }

    /// Write an amount back in raw protocol shape
    ///
    /// Native amounts become a drops string, everything else the
    /// `{currency, issuer, value}` record with the on-ledger code.
    pub fn to_raw(&self, amount: &CanonicalAmount) -> Value {
        if amount.is_native(&self.native_currency) {
            return Value::String(amount.value.clone());
        }

        let mut raw = json!({
            "currency": amount.code,
            "value": amount.value,
        });
        if let Some(issuer) = &amount.issuer {
            raw["issuer"] = Value::String(issuer.clone());
        }
        raw
    }

    /// Normalize a currency code into something displayable
    ///
    /// Rules (first match wins):
    /// 1. Exactly 3 ASCII letters/digits → unchanged
    /// 2. 40 hex characters → decoded (native, demurrage, ASCII, or truncated hex)
    /// 3. Anything else → UNKNOWN_CURRENCY
    pub fn normalize_currency(&self, code: &str) -> String {
        if is_standard_code(code) {
            return code.to_string();
        }

        if code.len() == HEX_CURRENCY_LEN {
            if let Ok(bytes) = hex::decode(code) {
                return self.decode_hex_currency(code, &bytes);
            }
        }

        tracing::debug!(code, "malformed currency code");
        UNKNOWN_CURRENCY.to_string()
    }

    fn native(&self, drops: String) -> CanonicalAmount {
        CanonicalAmount {
            value: drops,
            currency: self.native_currency.clone(),
            issuer: None,
            code: self.native_currency.clone(),
        }
    }

    fn decode_hex_currency(&self, code: &str, bytes: &[u8]) -> String {
        // All zeroes is the native asset in 160-bit form
        if bytes.iter().all(|b| *b == 0) {
            return self.native_currency.clone();
        }

        if bytes[0] == 0x01 {
            if let Some(demurrage) = decode_demurrage(bytes) {
                return demurrage;
            }
            return truncated_hex(code);
        }

        // Zero bytes are padding wherever they sit (standard codes in 160-bit
        // form carry the ASCII at bytes 12..15)
        let text: Vec<u8> = bytes.iter().copied().filter(|b| *b != 0).collect();

        if !text.is_empty() && text.iter().all(|b| (0x20..=0x7e).contains(b)) {
            let decoded = String::from_utf8_lossy(&text).trim().to_string();

            if decoded.eq_ignore_ascii_case(&self.native_currency) {
                return format!("Fake{}", self.native_currency);
            }
            if !decoded.is_empty() {
                return decoded;
            }
        }

        truncated_hex(code)
    }
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new(NATIVE_CURRENCY)
    }
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

/// Normalize with the default native asset ("XRP")
pub fn normalize_amount(raw: &Value) -> CanonicalAmount {
    AmountNormalizer::default().normalize(raw)
}

/// Normalize a currency code with the default native asset ("XRP")
pub fn normalize_currency_code(code: &str) -> String {
    AmountNormalizer::default().normalize_currency(code)
}

/// Convert a drops string into native units ("1500000" → 1.5)
pub fn drops_to_native(drops: &str) -> Option<Decimal> {
    let drops = Decimal::from_str(drops.trim()).ok()?;
    Some((drops / Decimal::from(DROPS_PER_NATIVE)).normalize())
}

/// Convert native units into drops (1.5 → "1500000"); None on overflow
pub fn native_to_drops(native: Decimal) -> Option<String> {
    let drops = native.checked_mul(Decimal::from(DROPS_PER_NATIVE))?;
    Some(drops.trunc().normalize().to_string())
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn is_standard_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Deterministic display form for hex codes that don't decode
fn truncated_hex(code: &str) -> String {
    format!("{}...", &code[..4].to_ascii_uppercase())
}

/// Demurrage layout: [0x01][3 bytes code][4 bytes start][8 bytes f64 period][4 bytes zero]
fn decode_demurrage(bytes: &[u8]) -> Option<String> {
    let currency = &bytes[1..4];
    if !currency.iter().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let mut period = [0u8; 8];
    period.copy_from_slice(&bytes[8..16]);
    let period = f64::from_be_bytes(period);
    if period == 0.0 || !period.is_finite() {
        return None;
    }

    let rate = ((SECONDS_PER_YEAR / period).exp() - 1.0) * 100.0;
    if !rate.is_finite() {
        return None;
    }

    let currency = String::from_utf8_lossy(currency);
    Some(format!("{} ({}%pa)", currency, format_rate(rate)))
}

fn format_rate(rate: f64) -> String {
    let rounded = (rate * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
