//! taskgate 主入口

use std::{sync::Arc, time::Duration};
use taskgate::{
    config::{AppConfig, StoreBackend},
    db,
    handlers::health,
    middleware::AppState,
    repository::{CredentialStore, InMemoryCredentialStore, PgCredentialStore},
    routes, telemetry,
};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("taskgate {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    health::set_start_time();

    // 1. 加载配置（缺少 JWT 密钥时直接失败）
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "taskgate starting...");

    // 3. 凭据存储
    let (credentials, db_pool) = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Database initialized");
            let store: Arc<dyn CredentialStore> = Arc::new(PgCredentialStore::new(pool.clone()));
            (store, Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory credential store, users are lost on restart");
            let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
            (store, None)
        }
    };

    // 4. 构建应用状态
    let app_state = Arc::new(AppState::new(config.clone(), credentials, db_pool)?);

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(
            config.server.graceful_shutdown_timeout_secs,
        ))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 优雅关闭信号处理
/// 收到信号后开始排空请求，超过 `timeout_secs` 仍未完成则强制退出
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(timeout_secs)).await;
        tracing::warn!(timeout_secs, "Graceful shutdown timed out, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("taskgate {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: taskgate [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  TASKGATE_SECURITY__JWT_SECRET   令牌签名密钥（必填，至少 32 字符）");
    println!("  TASKGATE_STORE__BACKEND         postgres | memory（默认 postgres）");
    println!("  TASKGATE_DATABASE__URL          PostgreSQL 连接 URL（postgres 后端必填）");
}
