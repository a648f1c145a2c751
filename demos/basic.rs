//! Basic example demonstrating the 99 API client.
//!
//! Run with:
//! ```
//! TAXIS99_API_KEY=your-key TAXIS99_COMPANY_ID=your-company cargo run --example basic
//! ```

use taxis99::{Client, Context, Filter};

#[tokio::main]
async fn main() -> taxis99::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating 99 client...");
    let client = Client::from_env()?;
    println!("Connected to: {}", client.base_url());

    let ctx = Context::new();

    // Companies visible to this API key
    println!("\n--- Companies ---");
    let companies = client.companies().find(&ctx).await?;
    for company in &companies {
        println!("  {} ({})", company.name, company.id);
    }

    // First page of cost centers
    println!("\n--- Cost Centers (first 10) ---");
    let filter = Filter::new().with("limit", "10").with("page", "1");
    let cost_centers = client.cost_centers().find(&ctx, Some(&filter)).await?;
    for cost_center in &cost_centers {
        println!("  #{} {}", cost_center.id, cost_center.name);
    }

    // Employees matching a search term
    println!("\n--- Employees matching 'santos' ---");
    let filter = Filter::new().with("search", "santos").with("limit", "5");
    let employees = client.employees().find(&ctx, Some(&filter)).await?;
    println!("Found {} employees", employees.len());

    if let Some(employee) = employees.first() {
        println!("\nFirst employee: {} <{}>", employee.name, employee.email);

        let assigned = client
            .employees()
            .find_cost_centers(&ctx, employee.id)
            .await?;
        println!("  Cost centers: {}", assigned.len());
        for cost_center in assigned {
            println!("    - {}", cost_center.name);
        }
    }

    Ok(())
}
