//! Data access port trait.

use crate::domain::error::FundbotError;
use crate::domain::holding::HoldingRecord;
use crate::domain::trade::TradeRecord;

/// Port producing the two typed tables the answering core runs over.
/// Loading happens once per process lifetime; the core never retries.
pub trait DataPort {
    fn load_holdings(&self) -> Result<Vec<HoldingRecord>, FundbotError>;

    fn load_trades(&self) -> Result<Vec<TradeRecord>, FundbotError>;
}
