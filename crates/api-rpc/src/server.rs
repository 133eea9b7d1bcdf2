//! JSON-RPC Server
//!
//! Serves the match engine over JSON-RPC 2.0 on TCP.

use crate::handler::RpcHandler;
use crate::types::{
    ListInterestsRequest, ListMatchesRequest, ListSwipesRequest, RecordInterestRequest,
    RecordSwipeRequest, TransitionMatchRequest,
};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::sync::Arc;
use swipematch_core::application::MatchEngine;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 9630;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

/// Register one method whose params deserialize into `$req` and whose
/// handler is `RpcHandler::$method`
macro_rules! register {
    ($module:expr, $handler:expr, $name:literal, $req:ty, $method:ident) => {{
        let handler = $handler.clone();
        $module
            .register_async_method($name, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: $req = params.parse()?;
                    handler.$method(req).await
                }
            })
            .map_err(|e| e.to_string())?;
    }};
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, engine: Arc<MatchEngine>) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(engine)),
        }
    }

    /// Build the method table
    pub fn into_module(self) -> Result<(RpcServerConfig, RpcModule<()>), String> {
        let mut module = RpcModule::new(());

        register!(module, self.handler, "swipe.record.v1", RecordSwipeRequest, record_swipe);
        register!(module, self.handler, "swipe.list.v1", ListSwipesRequest, list_swipes);
        register!(
            module,
            self.handler,
            "interest.record.v1",
            RecordInterestRequest,
            record_interest
        );
        register!(
            module,
            self.handler,
            "interest.list.v1",
            ListInterestsRequest,
            list_interests
        );
        register!(
            module,
            self.handler,
            "match.transition.v1",
            TransitionMatchRequest,
            transition_match
        );
        register!(module, self.handler, "match.list.v1", ListMatchesRequest, list_matches);

        Ok((self.config, module))
    }

    /// Start the JSON-RPC server
    ///
    /// Binds to the configured host; the default is localhost only.
    pub async fn start(self) -> Result<ServerHandle, String> {
        let (config, module) = self.into_module()?;
        let addr = format!("{}:{}", config.host, config.port);

        info!(
            host = %config.host,
            port = %config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let handle = server.start(module);
        info!("JSON-RPC server started successfully");

        Ok(handle)
    }
}
