// Store domain state
// 스토어 도메인 상태
use crate::shared::database::Database;
use crate::domains::store::services::{DepositService, LedgerService, PurchaseService};

/// Store domain state
/// 구매/원장 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct StoreState {
    pub purchase_service: PurchaseService,
    pub deposit_service: DepositService,
    pub ledger_service: LedgerService,
}

impl StoreState {
    /// Create StoreState with database
    /// StoreState 생성 (데이터베이스 필요)
    pub fn new(db: Database) -> Self {
        Self {
            purchase_service: PurchaseService::new(db.clone()),
            deposit_service: DepositService::new(db.clone()),
            ledger_service: LedgerService::new(db),
        }
    }
}
