//! End-to-end flows over the `LaunchApi` seam.

mod campaign_flow;
mod chat_flow;
mod dashboard_flow;
mod product_flow;
