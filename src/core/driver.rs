use crate::core::{InputSource, Pipeline, RunReport};
use crate::utils::error::{Result, WordCountError};
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Utc};

/// 輸入定位完成、開始計數時呼叫一次
pub type StartHook = Box<dyn Fn(&InputSource, DateTime<Utc>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Done,
    Failed,
}

pub struct PipelineDriver<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    state: RunState,
    on_start: Option<StartHook>,
}

impl<P: Pipeline> PipelineDriver<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            state: RunState::NotStarted,
            on_start: None,
        }
    }

    /// 讓呼叫端在計數前就拿到輸入大小與開始時間，失敗的執行也看得到
    pub fn on_start(
        mut self,
        hook: impl Fn(&InputSource, DateTime<Utc>) + Send + Sync + 'static,
    ) -> Self {
        self.on_start = Some(Box::new(hook));
        self
    }

    pub fn app_name(&self) -> &str {
        self.pipeline.app_name()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    /// 執行一次；不論成功與否皆不可重跑
    pub async fn run(&mut self) -> Result<RunReport> {
        if self.state != RunState::NotStarted {
            return Err(WordCountError::ProcessingError {
                message: format!("pipeline already ran (state: {:?})", self.state),
            });
        }

        self.state = RunState::Running;
        match self.execute().await {
            Ok(report) => {
                self.state = RunState::Done;
                Ok(report)
            }
            Err(e) => {
                self.state = RunState::Failed;
                tracing::error!("❌ {} failed: {}", self.app_name(), e);
                Err(e)
            }
        }
    }

    async fn execute(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting {}", self.app_name());

        let source = self.pipeline.locate().await?;
        tracing::info!(
            "📄 Input: {} ({} bytes)",
            source.path.display(),
            source.size_bytes
        );
        let input_path = source.path.clone();
        let input_bytes = source.size_bytes;

        let started_at = Utc::now();
        if let Some(hook) = &self.on_start {
            hook(&source, started_at);
        }

        let document = self.pipeline.extract(source).await?;
        let lines = document.lines.len();
        tracing::info!("Extracted {} lines", lines);
        self.monitor.record_stage("Extract");

        let result = self.pipeline.transform(document).await?;
        let total_tokens = result.total();
        let distinct_tokens = result.len();
        tracing::info!(
            "Counted {} tokens ({} distinct)",
            total_tokens,
            distinct_tokens
        );
        self.monitor.record_stage("Transform");

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);
        self.monitor.record_stage("Load");

        let finished_at = Utc::now();
        self.monitor.log_final_stats();

        Ok(RunReport {
            app_name: self.app_name().to_string(),
            input_path,
            input_bytes,
            started_at,
            finished_at,
            lines,
            total_tokens,
            distinct_tokens,
            output_path,
        })
    }
}
