use retcher::emulation::Browser;
use retcher::report::{fetch_and_report, report};
use retcher::retcher::Retcher;

static TARGET_URL: &str = "https://httpbin.org/absolute-redirect/4";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut stdout = std::io::stdout().lock();

    let retcher = Retcher::builder()
        .with_browser(Browser::Firefox)
        .with_ignore_tls_errors(true)
        .build();

    match retcher {
        Ok(retcher) => fetch_and_report(&retcher, TARGET_URL, &mut stdout).await,
        Err(e) => report(Err(e), &mut stdout),
    }
}
