use std::path::PathBuf;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::billing::BillingService;
use crate::core::Config;
use crate::lifecycle::LifecycleService;
use crate::orders::OrderPipeline;
use crate::whatsapp::WhatsAppIngest;

/// 服务器状态 - 持有配置和数据库的共享引用
///
/// ServerState 是整个服务的核心数据结构。`Surreal<Db>` 内部是
/// `Arc`，克隆成本极低，各服务按需从这里构造。
///
/// # 使用示例
///
/// ```ignore
/// let state = ServerState::initialize(&config).await;
/// let outcome = state.lifecycle().join_by_token(token, None, device).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/mesa.db)
    ///
    /// # Panics
    ///
    /// 目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("mesa.db");
        let db = crate::db::open(&db_path)
            .await
            .expect("Failed to initialize database");

        Self {
            config: config.clone(),
            db,
        }
    }

    /// 获取数据库连接 (浅拷贝)
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 桌台/座位生命周期服务
    pub fn lifecycle(&self) -> LifecycleService {
        LifecycleService::new(self.db.clone())
    }

    /// 订单管道
    pub fn orders(&self) -> OrderPipeline {
        OrderPipeline::new(self.db.clone())
    }

    /// WhatsApp 订单接入
    pub fn whatsapp(&self) -> WhatsAppIngest {
        WhatsAppIngest::new(self.db.clone(), self.config.delivery_fee)
    }

    /// 账单计算服务
    pub fn billing(&self) -> BillingService {
        BillingService::new(self.db.clone(), self.config.service_charge_pct)
    }
}
