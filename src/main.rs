#[tokio::main]
async fn main() {
    hubble_backend::run().await;
}
