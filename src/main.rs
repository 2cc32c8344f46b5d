use dotenv::dotenv;
use freshdict::services::search_service::{self, ResultKind, SearchFilter, SearchState, SortOrder};
use freshdict::storage::{FileAssetSource, FileStorage};
use freshdict::AppStore;
use std::env;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| ".freshdict".to_string());

    log::info!("🚀 Starting freshdict...");
    log::info!("📦 Assets: {}", data_dir);
    log::info!("💾 Storage: {}", storage_dir);

    let mut store = AppStore::new(
        Box::new(FileAssetSource::new(&data_dir)),
        Box::new(FileStorage::new(&storage_dir)),
    );
    store.initialize().await;

    // One-shot search over whatever was passed on the command line
    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    match search_service::run_search(&store, &query, SearchFilter::All) {
        SearchState::Initial => {
            println!("Usage: freshdict <query>");
        }
        SearchState::NoResults => {
            println!("Không tìm thấy kết quả cho \"{}\"", query.trim());
        }
        SearchState::Results(mut results) => {
            search_service::sort_results(&mut results, SortOrder::Relevance);
            println!("Tìm thấy {} kết quả:", results.len());
            for result in &results {
                let kind = match result.kind {
                    ResultKind::Blog => "blog",
                    ResultKind::Dictionary => "từ điển",
                };
                println!(
                    "  [{:>2}] ({}) {} — {}",
                    result.relevance, kind, result.title, result.excerpt
                );
            }
        }
    }
}
