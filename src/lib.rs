// Library crate: 통합 테스트에서 내부 모듈 접근용
// Library crate: exposes internal modules to the integration tests

pub mod domains;
pub mod routes;
pub mod shared;
