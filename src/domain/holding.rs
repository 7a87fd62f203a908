//! Holding row representation.

use rust_decimal::Decimal;

/// One holding position as loaded from the holdings table.
/// Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingRecord {
    /// Fund short name (`ShortName` column).
    pub fund: String,
    pub custodian: String,
    pub security: String,
    pub security_type: String,
    pub quantity: Decimal,
    /// Market value in base currency (`MV_Base` column).
    pub market_value: Decimal,
}
