//! # 测试辅助
//!
//! 单元测试共用的协作者替身、日志捕获和等待工具。

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::models::update::{InstallPromptRequest, PromptChoice, UpdateEvent, UpdateInfo};
use crate::services::feed::{Result, UpdateBackend, UpdateError};
use crate::services::notifier::{InstallPrompt, PromptResponder, StatusRelay, UpdateInstaller};

// ======== 等待工具 ========

/// 轮询等待条件成立，最多等待 5 秒
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

/// 给不应发生的事情留出发生的时间（只用于否定断言）
pub fn settle() {
    std::thread::sleep(Duration::from_millis(200));
}

// ======== 日志捕获 ========
// 按线程记录 info 及以上级别的日志，测试之间互不干扰

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT_LOGGER: Once = Once::new();

/// 开始捕获当前线程的日志
pub fn start_capture() {
    INIT_LOGGER.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Info);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// 当前线程自 `start_capture` 以来的日志
pub fn captured() -> Vec<String> {
    CAPTURED.with(|c| c.borrow().clone())
}

// ======== 通知器协作者 ========

/// 记录推送内容的窗口替身
pub struct RecordingRelay {
    window_open: AtomicBool,
    sent: Mutex<Vec<String>>,
}

impl RecordingRelay {
    pub fn new(window_open: bool) -> Self {
        Self {
            window_open: AtomicBool::new(window_open),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl StatusRelay for RecordingRelay {
    fn relay(&self, text: &str) -> bool {
        if !self.window_open.load(Ordering::SeqCst) {
            return false;
        }
        self.sent.lock().unwrap().push(text.to_string());
        true
    }
}

/// 记录对话框请求、由测试决定何时回应的对话框替身
#[derive(Default)]
pub struct RecordingPrompt {
    requests: Mutex<Vec<InstallPromptRequest>>,
    responders: Mutex<Vec<PromptResponder>>,
}

impl RecordingPrompt {
    pub fn requests(&self) -> Vec<InstallPromptRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 模拟用户点击按钮
    pub fn answer(&self, choice: PromptChoice) {
        let responder = self
            .responders
            .lock()
            .unwrap()
            .pop()
            .expect("没有待回应的对话框");
        responder(choice);
    }
}

impl InstallPrompt for RecordingPrompt {
    fn ask(&self, request: InstallPromptRequest, respond: PromptResponder) {
        self.requests.lock().unwrap().push(request);
        self.responders.lock().unwrap().push(respond);
    }
}

#[derive(Default)]
pub struct CountingInstaller {
    calls: AtomicUsize,
}

impl CountingInstaller {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UpdateInstaller for CountingInstaller {
    fn quit_and_install(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

// ======== 更新源 ========

/// 收集更新源产生的事件
#[derive(Default)]
pub struct EventLog {
    events: Mutex<Vec<UpdateEvent>>,
}

impl EventLog {
    pub fn push(&self, event: UpdateEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<UpdateEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// 可编排检查结果和下载过程的更新后端替身，当前版本固定为 1.0.0
#[derive(Default)]
pub struct FakeBackend {
    release: Option<UpdateInfo>,
    check_error: Mutex<Option<UpdateError>>,
    chunks: Vec<(usize, Option<u64>)>,
    fail_download: bool,
    gate: Option<Arc<Notify>>,
    checks: AtomicUsize,
    downloads: AtomicUsize,
    installs: AtomicUsize,
    relaunches: AtomicUsize,
}

impl FakeBackend {
    pub fn no_update() -> Self {
        Self::default()
    }

    pub fn failing(error: UpdateError) -> Self {
        Self {
            check_error: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub fn with_release(version: &str, chunks: Vec<(usize, Option<u64>)>) -> Self {
        Self {
            release: Some(UpdateInfo::new(version, None)),
            chunks,
            ..Self::default()
        }
    }

    pub fn fail_download(mut self) -> Self {
        self.fail_download = true;
        self
    }

    /// 检查在收到 `gate` 通知前保持挂起
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    pub fn relaunches(&self) -> usize {
        self.relaunches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateBackend for FakeBackend {
    type Release = UpdateInfo;

    fn current_version(&self) -> String {
        "1.0.0".to_string()
    }

    async fn check(&self) -> Result<Option<UpdateInfo>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let error = self.check_error.lock().unwrap().take();
        match error {
            Some(error) => Err(error),
            None => Ok(self.release.clone()),
        }
    }

    fn describe(&self, release: &UpdateInfo) -> UpdateInfo {
        release.clone()
    }

    async fn download(
        &self,
        _release: &UpdateInfo,
        on_chunk: &mut (dyn FnMut(usize, Option<u64>) + Send),
    ) -> Result<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        for (len, total) in &self.chunks {
            on_chunk(*len, *total);
        }
        if self.fail_download {
            return Err(UpdateError::Download("disk full".into()));
        }
        Ok(vec![0u8; 16])
    }

    fn install(&self, _release: &UpdateInfo, _bytes: &[u8]) -> Result<()> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn relaunch(&self) {
        self.relaunches.fetch_add(1, Ordering::SeqCst);
    }
}
