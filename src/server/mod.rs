//! Development server for the built site

use anyhow::{bail, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Mot;

/// Build the router serving files from `dist_dir`
pub fn router(dist_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dist_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Serve the output directory until the process is stopped
pub async fn start(mot: &Mot, ip: &str, port: u16) -> Result<()> {
    if !mot.dist_dir.is_dir() {
        bail!(
            "Output directory {:?} does not exist, run `mot build` first",
            mot.dist_dir
        );
    }

    let addr = socket_addr(ip, port)?;
    let app = router(&mot.dist_dir);

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse address - handle "localhost" specially
fn socket_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    Ok(format!("{}:{}", bind_ip, port).parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        assert_eq!(
            socket_addr("localhost", 8000).unwrap(),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(socket_addr("0.0.0.0", 80).unwrap().port(), 80);
        assert!(socket_addr("not an ip", 80).is_err());
    }

    #[tokio::test]
    async fn test_start_requires_dist() {
        let dir = tempfile::tempdir().unwrap();
        let mot = Mot::with_config(dir.path().to_path_buf(), Default::default());
        assert!(start(&mot, "localhost", 0).await.is_err());
    }
}
