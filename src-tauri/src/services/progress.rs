//! # 下载进度统计
//!
//! 更新包下载时，更新器插件按数据块回调，只提供本块大小和总大小（可能未知）。
//! `ProgressTracker` 把这些回调累积成完整的 `DownloadProgress`。

use std::time::Instant;

use crate::models::update::DownloadProgress;

/// 下载进度累加器
pub struct ProgressTracker {
    transferred: u64,
    started_at: Instant,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(started_at: Instant) -> Self {
        Self {
            transferred: 0,
            started_at,
        }
    }

    /// 记录一个数据块，返回当前累计进度
    ///
    /// # 参数
    /// - `chunk_len` - 本次收到的字节数
    /// - `total` - 更新包总大小，服务器未返回 Content-Length 时为 `None`
    pub fn advance(&mut self, chunk_len: u64, total: Option<u64>) -> DownloadProgress {
        self.transferred = self.transferred.saturating_add(chunk_len);

        let elapsed = self.started_at.elapsed().as_secs_f64();
        let bytes_per_second = if elapsed > 0.0 {
            (self.transferred as f64 / elapsed) as u64
        } else {
            self.transferred
        };

        // 总大小为 0 时百分比没有意义
        let percent = total
            .filter(|t| *t > 0)
            .map(|t| (self.transferred as f64 / t as f64 * 100.0).min(100.0));

        DownloadProgress {
            transferred: self.transferred,
            total,
            percent,
            bytes_per_second,
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_accumulates_chunks() {
        let mut tracker = ProgressTracker::new();
        tracker.advance(100, Some(400));
        let progress = tracker.advance(100, Some(400));
        assert_eq!(progress.transferred, 200);
        assert_eq!(progress.total, Some(400));
        assert_eq!(progress.percent, Some(50.0));
    }

    #[test]
    fn test_unknown_or_zero_total_has_no_percent() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.advance(10, None).percent, None);
        assert_eq!(tracker.advance(10, Some(0)).percent, None);
    }

    #[test]
    fn test_percent_is_capped() {
        let mut tracker = ProgressTracker::new();
        let progress = tracker.advance(500, Some(400));
        assert_eq!(progress.percent, Some(100.0));
    }

    #[test]
    fn test_bytes_per_second_uses_elapsed_time() {
        let started = Instant::now() - Duration::from_secs(2);
        let mut tracker = ProgressTracker::starting_at(started);
        let progress = tracker.advance(1000, None);
        assert!(progress.bytes_per_second <= 500);
        assert!(progress.bytes_per_second > 0);
    }
}
