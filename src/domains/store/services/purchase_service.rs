use crate::shared::database::{
    Database, GameRepository, PurchaseRepository, TransactionRepository, UserRepository,
    WishlistRepository,
};
use crate::domains::store::models::purchase::{LibraryItem, Purchase};
use crate::domains::store::models::transaction::{
    BalanceTransaction, BalanceTransactionCreate, TransactionStatus, TransactionType,
};
use crate::shared::errors::StoreError;

/// 구매 정산 서비스
/// Purchase settlement service
///
/// 역할:
/// - 구매 정산: 잔고 차감 + 원장 기록 + 소유권 생성 + 다운로드 집계
/// - 환불 처리 (관리자 전용): 구매의 역연산
/// - 라이브러리 조회
///
/// 처리 흐름:
/// 1. API Handler → PurchaseService
/// 2. PurchaseService → 사전 조건 검증 (게임 존재, 중복 구매, 잔고)
/// 3. PurchaseService → Repository (단일 DB 트랜잭션)
///
/// 원자성:
/// - 정산의 모든 단계는 하나의 DB 트랜잭션으로 묶임.
///   어느 단계든 실패하면 전부 롤백되고 부분 성공 상태가 남지 않음.
/// - 잔고 검사와 차감은 조건부 UPDATE 한 문장으로 합쳐져 있어서
///   동시 구매 요청이 잔고를 초과 인출할 수 없음.
#[derive(Clone)]
pub struct PurchaseService {
    db: Database,
}

impl PurchaseService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 구매 정산
    /// Settle a purchase
    ///
    /// # Arguments
    /// * `user_id` - 구매자 ID
    /// * `game_id` - 구매할 게임 ID
    ///
    /// # Returns
    /// * `Ok((Purchase, i64))` - 생성된 구매 기록과 차감 후 잔고
    /// * `Err(StoreError)` - 게임 없음 / 중복 구매 / 잔고 부족 / DB 오류
    ///
    /// # 처리 과정
    /// 1. 게임 조회 (없으면 GAME_NOT_FOUND)
    /// 2. 중복 구매 확인 (이미 있으면 ALREADY_PURCHASED)
    /// 3. 조건부 차감 (잔고 부족이면 INSUFFICIENT_BALANCE, 아무 변경 없음)
    /// 4. 구매 기록 + 원장 엔트리 생성, 다운로드 수 증가
    /// 5. 위시리스트에 있었다면 제거
    pub async fn purchase(
        &self,
        user_id: u64,
        game_id: u64,
    ) -> Result<(Purchase, i64), StoreError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let game_repo = GameRepository::new(self.db.pool().clone());
        let purchase_repo = PurchaseRepository::new(self.db.pool().clone());
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());
        let wishlist_repo = WishlistRepository::new(self.db.pool().clone());

        // 정산 전체를 하나의 트랜잭션으로 묶음
        // The whole settlement runs inside one transaction
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 1. 게임 존재 확인
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let game = game_repo
            .get_by_id_in_tx(&mut tx, game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch game: {}", e)))?
            .ok_or(StoreError::GameNotFound { id: game_id })?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 2. 중복 구매 확인 (멱등성 가드)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let already_owned = purchase_repo
            .exists_in_tx(&mut tx, user_id, game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to check ownership: {}", e)))?;

        if already_owned {
            return Err(StoreError::AlreadyPurchased { game_id });
        }

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 3. 사용자 조회 (원장 스냅샷용 현재 잔고)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let user = user_repo
            .get_user_by_id_in_tx(&mut tx, user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(StoreError::UserNotFound { id: user_id })?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 4. 조건부 차감 (잔고 검사 + 차감이 한 문장)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let debited = user_repo
            .try_debit_balance_in_tx(&mut tx, user_id, game.price)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to debit balance: {}", e)))?;

        if !debited {
            // 트랜잭션이 버려지면서 롤백됨 (아무 변경 없음)
            return Err(StoreError::InsufficientBalance {
                required: game.price,
                available: user.balance,
            });
        }

        let new_balance = user.balance - game.price;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 5. 구매 기록 생성 (가격 스냅샷 포함)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let purchase = purchase_repo
            .create_in_tx(&mut tx, user_id, game_id, game.price)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to create purchase: {}", e)))?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 6. 원장 엔트리 생성 (자동 승인 PURCHASE)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        transaction_repo
            .create_in_tx(
                &mut tx,
                &BalanceTransactionCreate {
                    user_id,
                    amount: -game.price,
                    balance_before: user.balance,
                    balance_after: new_balance,
                    transaction_type: TransactionType::Purchase,
                    status: TransactionStatus::Approved,
                    description: Some(format!("Purchase: {}", game.title)),
                    related_game_id: Some(game_id),
                },
            )
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to record transaction: {}", e)))?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 7. 다운로드 수 증가 + 위시리스트 정리 + 커밋
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        game_repo
            .increment_downloads_in_tx(&mut tx, game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to increment downloads: {}", e)))?;

        // 구매한 게임은 더 이상 찜 목록에 남아 있을 이유가 없음
        wishlist_repo
            .remove_in_tx(&mut tx, user_id, game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to remove wishlist entry: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit purchase: {}", e)))?;

        tracing::info!(user_id, game_id, price = game.price, "purchase settled");

        Ok((purchase, new_balance))
    }

    /// 환불 처리 (관리자 전용) - 구매의 역연산
    /// Refund a purchase (admin only) - the inverse of settlement
    ///
    /// # Returns
    /// * `Ok((BalanceTransaction, i64))` - 기록된 REFUND 거래와 환불 후 잔고
    /// * `Err(StoreError)` - 구매 기록 없음 / DB 오류
    ///
    /// # 처리 과정
    /// 1. 구매 기록 조회 (없으면 PURCHASE_NOT_FOUND - 이중 환불 방지)
    /// 2. 결제액(price_paid)을 잔고에 환급
    /// 3. 자동 승인 REFUND 원장 엔트리 생성
    /// 4. 구매 기록 삭제 (소유권 회수) + 다운로드 수 감소
    pub async fn refund(
        &self,
        purchase_id: u64,
    ) -> Result<(BalanceTransaction, i64), StoreError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let game_repo = GameRepository::new(self.db.pool().clone());
        let purchase_repo = PurchaseRepository::new(self.db.pool().clone());
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // 1. 구매 기록 조회 (삭제된 기록은 다시 환불할 수 없음)
        let purchase = purchase_repo
            .get_by_id_in_tx(&mut tx, purchase_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch purchase: {}", e)))?
            .ok_or(StoreError::PurchaseNotFound { id: purchase_id })?;

        let user = user_repo
            .get_user_by_id_in_tx(&mut tx, purchase.user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(StoreError::UserNotFound { id: purchase.user_id })?;

        let game = game_repo
            .get_by_id_in_tx(&mut tx, purchase.game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch game: {}", e)))?;

        // 2. 결제액 환급 (구매 시점 스냅샷 기준, 현재 판매가와 무관)
        user_repo
            .credit_balance_in_tx(&mut tx, purchase.user_id, purchase.price_paid)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to credit balance: {}", e)))?;

        let new_balance = user.balance + purchase.price_paid;

        // 3. REFUND 원장 엔트리 (자동 승인)
        let description = match &game {
            Some(g) => format!("Refund: {}", g.title),
            None => format!("Refund: purchase #{}", purchase.id),
        };
        let transaction = transaction_repo
            .create_in_tx(
                &mut tx,
                &BalanceTransactionCreate {
                    user_id: purchase.user_id,
                    amount: purchase.price_paid,
                    balance_before: user.balance,
                    balance_after: new_balance,
                    transaction_type: TransactionType::Refund,
                    status: TransactionStatus::Approved,
                    description: Some(description),
                    related_game_id: Some(purchase.game_id),
                },
            )
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to record refund: {}", e)))?;

        // 4. 소유권 회수 + 다운로드 수 감소
        purchase_repo
            .delete_in_tx(&mut tx, purchase_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to delete purchase: {}", e)))?;

        game_repo
            .decrement_downloads_in_tx(&mut tx, purchase.game_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to decrement downloads: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit refund: {}", e)))?;

        tracing::info!(
            purchase_id,
            user_id = purchase.user_id,
            amount = purchase.price_paid,
            "purchase refunded"
        );

        Ok((transaction, new_balance))
    }

    /// 사용자 라이브러리 조회
    /// Fetch the user's library
    pub async fn library(&self, user_id: u64) -> Result<Vec<LibraryItem>, StoreError> {
        let purchase_repo = PurchaseRepository::new(self.db.pool().clone());

        purchase_repo
            .list_library(user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to list library: {}", e)))
    }
}
