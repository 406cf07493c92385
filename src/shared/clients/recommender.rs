use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

// 추천 capability 인터페이스
// Recommendation capability interface
//
// 추천 로직은 외부 프로세스(파이썬 스크립트)에 있고, 본 서버는
// 결과를 불투명하게 전달만 함. 실패하면 호출 측이 인기순 폴백을 사용.
// The recommendation logic lives in an external process; the server passes
// its output through opaquely. Callers fall back to the popular listing on failure.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, user_id: u64, owned_game_ids: &[u64], limit: usize) -> Result<Vec<u64>>;
}

// 스크립트에 넘기는 입력 파일 (game.json)
// Input file handed to the script (game.json)
#[derive(Debug, Serialize)]
struct HandoffInput<'a> {
    user_id: u64,
    owned_game_ids: &'a [u64],
    limit: usize,
}

// 스크립트가 돌려주는 출력 파일 (recommendations.json)
// Output file written back by the script (recommendations.json)
#[derive(Debug, Deserialize)]
struct HandoffOutput {
    game_ids: Vec<u64>,
}

/// 파이썬 추천 스크립트 클라이언트
/// Python recommendation script client
///
/// 호출 규약: 핸드오프 디렉터리에 game.json을 쓰고
/// `python3 <script> <dir>` 실행 후 recommendations.json을 읽음.
pub struct ScriptRecommender {
    script_path: PathBuf,
    timeout: Duration,
}

impl ScriptRecommender {
    // 클라이언트 생성
    // Create new recommender client instance
    pub fn new(script_path: PathBuf, timeout: Duration) -> Self {
        Self {
            script_path,
            timeout,
        }
    }
}

#[async_trait]
impl Recommender for ScriptRecommender {
    async fn recommend(&self, user_id: u64, owned_game_ids: &[u64], limit: usize) -> Result<Vec<u64>> {
        // 호출별 핸드오프 디렉터리 생성 (동시 호출 간 파일 충돌 방지)
        // Per-call handoff directory (concurrent calls must not share files)
        let dir = std::env::temp_dir().join(format!(
            "recommender-{}-{}",
            user_id,
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        tokio::fs::create_dir_all(&dir)
            .await
            .context("Failed to create recommender handoff directory")?;

        let result = self.run_script(&dir, user_id, owned_game_ids, limit).await;

        // 핸드오프 파일 정리 (실패해도 추천 결과에는 영향 없음)
        // Clean up handoff files; failures here do not affect the result
        if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
            tracing::warn!("failed to clean up recommender handoff dir: {e}");
        }

        result
    }
}

impl ScriptRecommender {
    async fn run_script(
        &self,
        dir: &std::path::Path,
        user_id: u64,
        owned_game_ids: &[u64],
        limit: usize,
    ) -> Result<Vec<u64>> {
        // 입력 파일 작성
        // Write the input file
        let input = HandoffInput {
            user_id,
            owned_game_ids,
            limit,
        };
        let input_path = dir.join("game.json");
        tokio::fs::write(&input_path, serde_json::to_vec(&input)?)
            .await
            .context("Failed to write recommender input file")?;

        tracing::debug!("invoking recommender script: {:?}", self.script_path);

        // 스크립트 실행 (타임아웃 적용)
        // Run the script under a timeout
        let child = Command::new("python3")
            .arg(&self.script_path)
            .arg(dir)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .context("Recommender script timed out")?
            .context("Failed to run recommender script")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Recommender script failed: {} - {}", output.status, stderr);
        }

        // 출력 파일 파싱
        // Parse the output file
        let output_path = dir.join("recommendations.json");
        let bytes = tokio::fs::read(&output_path)
            .await
            .context("Failed to read recommender output file")?;
        let parsed: HandoffOutput =
            serde_json::from_slice(&bytes).context("Failed to parse recommender output")?;

        Ok(parsed.game_ids)
    }
}
