use crate::render_bridge::model::CoverageReport;
use crate::workflow::runner::Runner;
use anyhow::Context;
use coveragecore::scenario::ScenarioConfig;
use log::{error, info};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn render_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

type SharedReport = Arc<RwLock<CoverageReport>>;

/// Holds the latest coverage report and serves it to an external renderer.
pub struct RenderBridge {
    state: SharedReport,
}

impl RenderBridge {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CoverageReport::default())),
        }
    }

    /// Starts the HTTP endpoint on a background thread:
    /// - `GET /coverage` returns the latest report
    /// - `POST /scenario` runs a scenario JSON and stores its report
    pub fn serve(&self, runner: Arc<Runner>, address: SocketAddr) -> anyhow::Result<()> {
        let state_for_filter = self.state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("coverage")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedReport| async move {
                let reply = match state.read() {
                    Ok(report) => warp::reply::json(&*report),
                    Err(_) => return Err(warp::reject::custom(WarpError)),
                };
                Ok(reply)
            });

        let scenario_route = warp::path("scenario")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |scenario: ScenarioConfig, state: SharedReport, runner: Arc<Runner>| async move {
                    let outcome = runner.execute_scenario(&scenario).and_then(|result| {
                        let report = CoverageReport::from_result(&result);
                        store(&state, report.clone())?;
                        Ok(report)
                    });
                    match outcome {
                        Ok(report) => {
                            info!(
                                "[bridge] scenario {} -> {} transmitters",
                                report.name,
                                report.transmitter_count()
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "name": report.name,
                                    "coverage_ratio": report.coverage_ratio,
                                    "stats": report.stats,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            error!("[bridge] scenario error: {:#}", err);
                            Ok(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "error",
                                    "message": format!("{:#}", err),
                                })),
                                StatusCode::UNPROCESSABLE_ENTITY,
                            ))
                        }
                    }
                },
            );

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building render bridge runtime")?;
        thread::spawn(move || {
            let routes = get_route.or(scenario_route);
            runtime.block_on(async move {
                warp::serve(routes).run(address).await;
            });
        });
        info!("[bridge] serving coverage on http://{}", address);
        Ok(())
    }

    pub fn publish(&self, report: CoverageReport) -> anyhow::Result<()> {
        info!(
            "[bridge] published {} ({}x{}, {} transmitters)",
            report.name,
            report.width,
            report.height,
            report.transmitter_count()
        );
        store(&self.state, report)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> CoverageReport {
        self.state.read().map(|report| report.clone()).unwrap_or_default()
    }
}

impl Default for RenderBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn store(state: &SharedReport, report: CoverageReport) -> anyhow::Result<()> {
    let mut guard = state
        .write()
        .map_err(|_| anyhow::anyhow!("render bridge state poisoned"))?;
    *guard = report;
    Ok(())
}
