mod common;
mod external_deps;
mod prelude;
use common::*;

mod env_configuration;

mod enums;

mod traits;

mod model;
use model::configs::total_config::*;

mod dto;

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::chart_service_impl::*;

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();
    set_global_logger();

    info!("Chart render server start!");

    /* 의존 주입 */
    let chart_service: ChartServiceImpl =
        ChartServiceImpl::new(get_chart_config_info(), get_watermark_config_info());

    let main_controller: MainController<ChartServiceImpl> =
        MainController::new(Arc::new(chart_service));

    main_controller.run_server().await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
