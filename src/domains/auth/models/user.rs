use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

// =====================================================
// User 모델 (계정 + 잔고)
// =====================================================
// 역할: 계정 정보와 현재 잔고를 함께 보관
// 설명: balance는 원장(balance_transactions)의 APPROVED 거래가
//       반영된 현재 값. DB CHECK 제약으로 음수가 될 수 없음.
// =====================================================

/// 사용자 역할
/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// 일반 고객
    /// Regular customer
    Customer,
    /// 관리자 (입금 심사, 카탈로그 관리)
    /// Administrator (deposit review, catalog management)
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CUSTOMER" => Some(Role::Customer),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// 사용자 모델 (데이터베이스에서 조회한 전체 정보)
/// User model (full record retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (DB에서 자동 생성)
    pub id: u64,

    /// 이메일 (로그인 ID, 유일함)
    /// Email (login ID, unique)
    pub email: String,

    /// 해싱된 비밀번호 (절대 응답에 포함하지 않음)
    /// Hashed password (never included in responses)
    pub password_hash: String,

    /// 닉네임 (선택)
    /// Nickname (optional)
    pub nickname: Option<String>,

    /// 역할
    pub role: Role,

    /// 현재 잔고 (음수 불가)
    /// Current balance (never negative)
    pub balance: i64,

    /// 생성 시각
    pub created_at: DateTime<Utc>,

    /// 수정 시각
    pub updated_at: DateTime<Utc>,
}

/// 사용자 정보 응답 모델 (비밀번호 제외)
/// User response model (password excluded)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    /// User ID
    pub id: u64,

    /// 이메일
    /// Email
    #[schema(example = "user@example.com")]
    pub email: String,

    /// 닉네임
    /// Nickname
    #[schema(example = "gamer123")]
    pub nickname: Option<String>,

    /// 역할
    pub role: Role,

    /// 현재 잔고
    /// Current balance
    #[schema(example = 150000)]
    pub balance: i64,

    /// 가입 시각
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.role,
            balance: user.balance,
            created_at: user.created_at,
        }
    }
}

/// 사용자 생성 요청 (Repository에서 사용)
/// User creation model (used by the repository)
#[derive(Debug)]
pub struct UserCreate {
    pub email: String,
    pub password_hash: String,
    pub nickname: Option<String>,
    pub role: Role,
}

/// 관리자용 사용자 목록 쿼리 파라미터
/// Admin user listing query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserListQuery {
    /// 페이지 크기 (기본 50, 최대 100)
    /// Page size (default 50, capped at 100)
    pub limit: Option<i64>,

    /// 페이지 오프셋 (기본 0)
    /// Page offset (default 0)
    pub offset: Option<i64>,
}

/// 관리자용 사용자 목록 응답 모델
/// Admin user listing response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = UserListResponse)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}
