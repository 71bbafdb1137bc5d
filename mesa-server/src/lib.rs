//! Mesa Server - 餐厅扫码点餐后端
//!
//! # 架构概述
//!
//! 本模块是 Mesa Server 的主入口，提供以下核心功能：
//!
//! - **桌台生命周期** (`lifecycle`): 桌台占用/释放与座位加入/离开
//! - **订单管道** (`orders`): 购物车提交、状态推进、单品状态
//! - **WhatsApp 接入** (`whatsapp`): 外卖订单 webhook 摄入
//! - **账单** (`billing`): 按座位分账与服务费计算
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── lifecycle/     # 桌台/座位生命周期
//! ├── orders/        # 订单管道
//! ├── whatsapp/      # WhatsApp webhook 摄入
//! ├── billing/       # 账单计算
//! ├── session/       # 会话解析
//! └── utils/         # 错误、日志、金额工具
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod orders;
pub mod session;
pub mod utils;
pub mod whatsapp;

// Re-export 公共类型
pub use billing::{BillingService, TableBill};
pub use core::{Config, Server, ServerState};
pub use lifecycle::{JoinOutcome, LifecycleService};
pub use orders::{OrderPipeline, SubmitOrder};
pub use session::{SessionResolution, resolve};
pub use utils::{AppError, AppResponse, AppResult};
pub use whatsapp::WhatsAppIngest;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不是错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  _________ _
  / /|_/ / _ \/ ___/ __ `/
 / /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
