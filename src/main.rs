#[actix_web::main]
async fn main() -> Result<(), csv_augmentor_lib::AppError> {
    csv_augmentor_lib::run().await
}
