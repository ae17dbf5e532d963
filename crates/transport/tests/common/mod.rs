//! Shared helpers for this crate's integration tests.
//!
//! Each crate's `tests/` directory keeps its own copy of `TestServer`, since
//! integration tests cannot share modules across crates without a dev-only
//! helper crate.

use axum::Router;

/// Policy engine stand-in served from its own runtime thread.
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub fn spawn(app: Router) -> Self {
        // Bind up front so requests queue until the runtime is serving.
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind ephemeral port");
        listener
            .set_nonblocking(true)
            .expect("failed to make listener non-blocking");
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("failed to build runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .unwrap();
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
