// Session state for one dashboard run
pub mod app_state;

pub use app_state::AppState;
