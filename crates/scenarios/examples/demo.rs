//! Demo of the scenarios crate
use scenarios::*;

fn main() {
    println!("wod-gen Load-Test Scenarios");
    println!("===========================\n");

    println!("Functional scenarios:");
    for scenario in Presets::functional_scenarios() {
        println!("  {:<10} - {} [{}]", scenario.name, scenario.description, scenario.profile);
    }

    println!("\nPerformance scenarios:");
    for scenario in Presets::performance_scenarios() {
        println!("  {:<10} - {} [{}]", scenario.name, scenario.description, scenario.profile);
    }

    println!("\nExample payload: {}", payload::example_json());

    // Plan every scenario against a local target with a placeholder token
    let config = match Config::new(
        "http://localhost:8080",
        Credential::Bearer("demo-token".to_string()),
        Endpoints::default(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };

    println!("\nPlanned requests:");
    for scenario in Presets::all_scenarios() {
        match scenario.plan(&config) {
            Ok(plan) => {
                for request in &plan.requests {
                    println!(
                        "  {:<10} {:<4} {} (expect {})",
                        plan.name, request.method, request.url, request.expected_status
                    );
                }
                println!("  {:<10} options {}", plan.name, plan.profile.options());
            }
            Err(e) => println!("  {:<10} cannot plan: {}", scenario.name, e),
        }
    }
}
