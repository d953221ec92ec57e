use app::{
    AppState,
    config::Config,
    search::{SortOrder, current_page, offset_for_page, total_pages},
};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Free-text search query
    #[arg(default_value = "")]
    query: String,

    /// 1-based result page
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Sort order: relevance, title, popularity
    #[arg(long, default_value = "relevance")]
    sort: String,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let state = AppState::new(Config::load());

    state.search.set_query(args.query);
    state.search.set_ordering(match args.sort.as_str() {
        "title" => SortOrder::Title,
        "popularity" => SortOrder::Popularity,
        _ => SortOrder::Relevance,
    });

    let limit = state.search.snapshot().limit;
    state.search.set_offset(offset_for_page(args.page, limit));

    state.search.fetch_page().await;

    let snapshot = state.search.snapshot();
    if let Some(error) = &snapshot.error {
        println!("Fetch failed: {error}\n");
    }

    println!(
        "Page {} / {}",
        current_page(snapshot.offset, snapshot.limit),
        total_pages(snapshot.total_count, snapshot.limit)
    );
    println!("Total remote results: {}\n", snapshot.total_count);

    for item in state.composed_view() {
        println!("[{}] {}", item.id, item.title);
    }
}
