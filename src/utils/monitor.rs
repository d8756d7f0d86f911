use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// 單一階段的量測結果
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub stage_time: Duration,
    pub elapsed_time: Duration,
    pub memory_usage_mb: Option<u64>,
    pub cpu_usage: Option<f32>,
}

#[cfg(feature = "cli")]
struct ProcessProbe {
    system: System,
    pid: Pid,
}

#[cfg(feature = "cli")]
impl ProcessProbe {
    fn new() -> Option<Self> {
        let pid = sysinfo::get_current_pid().ok()?;
        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();
        Some(Self { system, pid })
    }

    fn sample(&mut self) -> Option<(u64, f32)> {
        self.system.refresh_all();
        let process = self.system.process(self.pid)?;
        Some((process.memory() / 1024 / 1024, process.cpu_usage()))
    }
}

pub struct SystemMonitor {
    enabled: bool,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    stages: Mutex<Vec<StageStats>>,
    #[cfg(feature = "cli")]
    probe: Option<Mutex<ProcessProbe>>,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start_time: now,
            last_mark: Mutex::new(now),
            stages: Mutex::new(Vec::new()),
            #[cfg(feature = "cli")]
            probe: if enabled {
                ProcessProbe::new().map(Mutex::new)
            } else {
                None
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[cfg(feature = "cli")]
    fn sample(&self) -> (Option<u64>, Option<f32>) {
        let sampled = self
            .probe
            .as_ref()
            .and_then(|probe| probe.lock().ok())
            .and_then(|mut probe| probe.sample());
        match sampled {
            Some((memory, cpu)) => (Some(memory), Some(cpu)),
            None => (None, None),
        }
    }

    #[cfg(not(feature = "cli"))]
    fn sample(&self) -> (Option<u64>, Option<f32>) {
        (None, None)
    }

    /// 記錄一個階段結束，回傳該階段的量測；未啟用時不做任何事
    pub fn record_stage(&self, stage: &str) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let stage_time = {
            let mut last = self.last_mark.lock().ok()?;
            let delta = now.duration_since(*last);
            *last = now;
            delta
        };
        let (memory_usage_mb, cpu_usage) = self.sample();

        let stats = StageStats {
            stage: stage.to_string(),
            stage_time,
            elapsed_time: now.duration_since(self.start_time),
            memory_usage_mb,
            cpu_usage,
        };

        match (stats.memory_usage_mb, stats.cpu_usage) {
            (Some(memory), Some(cpu)) => tracing::info!(
                "📊 {} - Stage: {:?}, CPU: {:.1}%, Memory: {}MB, Total: {:?}",
                stage,
                stats.stage_time,
                cpu,
                memory,
                stats.elapsed_time
            ),
            _ => tracing::info!(
                "📊 {} - Stage: {:?}, Total: {:?}",
                stage,
                stats.stage_time,
                stats.elapsed_time
            ),
        }

        if let Ok(mut stages) = self.stages.lock() {
            stages.push(stats.clone());
        }
        Some(stats)
    }

    pub fn stages(&self) -> Vec<StageStats> {
        self.stages
            .lock()
            .map(|stages| stages.clone())
            .unwrap_or_default()
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let peak_memory = self
            .stages()
            .iter()
            .filter_map(|s| s.memory_usage_mb)
            .max();
        match peak_memory {
            Some(peak) => tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.start_time.elapsed(),
                peak
            ),
            None => tracing::info!(
                "📊 Final Stats - Total Time: {:?}",
                self.start_time.elapsed()
            ),
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
