//! Terminal search box: each stdin line replaces the query text, and every
//! view the session publishes is printed. Lines starting with `/company` or
//! `/role` set the dropdown filters; `/clear` resets them.

use std::sync::Arc;

use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};

use prep_well_service::config::search_base_url;
use prep_well_service::services::filter::FilterSelection;
use prep_well_service::services::query_engine::{
    SearchConfig, SearchPhase, SearchSession, SearchView,
};
use prep_well_service::services::search_client::RemoteSearchClient;

fn render(view: &SearchView) {
    println!("── {:?} '{}' ({} results)", view.phase, view.query, view.items.len());
    for item in &view.items {
        match &item.outcome {
            Some(outcome) => println!("   {} · {} · {} [{}]", item.company, item.role, item.kind, outcome),
            None => println!("   {} · {} · {}", item.company, item.role, item.kind),
        }
    }
    if let Some(notice) = &view.notice {
        println!("   ⚠️ {}: {}", notice.title, notice.description);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = SearchConfig::default();
    let base_url = search_base_url();
    let client = Arc::new(RemoteSearchClient::new(&base_url, &config)?);

    let local = match client.fetch_interviews().await {
        Ok(list) => list,
        Err(e) => {
            log::warn!("⚠️ Could not load listing from {}: {}", base_url, e);
            Vec::new()
        }
    };

    let session = SearchSession::new(client, local, config);
    let mut views = session.subscribe();
    render(&views.borrow_and_update());

    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            render(&view);
        }
    });

    let mut selection = FilterSelection::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(company) = line.strip_prefix("/company") {
            selection.company = Some(company.trim().to_string()).filter(|c| !c.is_empty());
            session.set_filters(selection.clone());
        } else if let Some(role) = line.strip_prefix("/role") {
            selection.role = Some(role.trim().to_string()).filter(|r| !r.is_empty());
            session.set_filters(selection.clone());
        } else if line.trim() == "/clear" {
            selection = FilterSelection::default();
            session.set_filters(selection.clone());
        } else {
            session.set_query(&line);
        }
    }

    // let a pending search settle before exiting
    let mut settle = session.subscribe();
    let _ = tokio::time::timeout(config.debounce + config.request_timeout, async {
        while matches!(
            settle.borrow_and_update().phase,
            SearchPhase::Debouncing | SearchPhase::Searching
        ) {
            if settle.changed().await.is_err() {
                break;
            }
        }
    })
    .await;

    drop(session);
    let _ = printer.await;
    Ok(())
}
