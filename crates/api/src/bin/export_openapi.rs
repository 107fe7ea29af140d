// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > openapi.json

use evently_api::openapi::ApiDoc;

fn main() {
    println!("{}", ApiDoc::to_json());
}
