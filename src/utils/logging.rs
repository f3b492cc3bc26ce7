// 日志工具模块
//
// 命令行入口通过 `init` 打开滚动文件日志，库代码只依赖 `log` 门面

use crate::config::LogConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::sync::Mutex;

/// 全局日志句柄，关闭时 flush 异步缓冲
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 日志守卫，离开作用域时刷新并关闭日志
///
/// 命令行入口在 `main` 中持有它，任何返回路径都会写完缓冲的日志
#[must_use = "丢弃守卫会立即关闭日志"]
pub struct LogGuard(());

impl Drop for LogGuard {
    fn drop(&mut self) {
        shutdown();
    }
}

/// 初始化日志系统
///
/// 日志写入 `dir/file`，按 `max_file_size` 轮转并保留最近 `max_files` 个文件
///
/// # Examples
/// ```no_run
/// use graphquest::config::Config;
/// use graphquest::utils::logging;
///
/// let config = Config::default();
/// let _guard = logging::init(&config.log).expect("日志初始化失败");
/// log::info!("开始生成图");
/// ```
pub fn init(config: &LogConfig) -> Result<LogGuard, Box<dyn std::error::Error>> {
    let handle = Logger::try_with_str(&config.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.file)
                .directory(&config.dir),
        )
        .rotate(
            Criterion::Size(config.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        *guard = Some(handle);
    }

    log::info!(
        "日志已启用: 级别={}, 位置={}/{}",
        config.level,
        config.dir,
        config.file
    );
    Ok(LogGuard(()))
}

/// 刷新并关闭日志，未初始化时什么也不做
///
/// 通常由 `LogGuard` 在 drop 时调用
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            handle.flush();
        }
    }
}

pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}
