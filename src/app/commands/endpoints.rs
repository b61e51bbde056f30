//! Access points of every service.

use crate::app::AppContext;
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub key: String,
    pub name: String,
    pub url: String,
    pub reused: bool,
}

pub fn execute<P, C, S>(ctx: &AppContext<P, C, S>) -> Vec<AccessPoint>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    ctx.session_registry()
        .iter()
        .map(|(key, state)| AccessPoint {
            key: key.to_string(),
            name: state.name().to_string(),
            url: state.endpoint().base_url(),
            reused: state.is_reused(),
        })
        .collect()
}
