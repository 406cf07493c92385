// Domains module: 도메인별 모듈 (models / services / handlers / routes)
// Domains module: per-domain modules (models / services / handlers / routes)

pub mod auth;
pub mod catalog;
pub mod social;
pub mod store;
