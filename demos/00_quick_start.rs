/// quick start - register a customer and take a first loan
use chrono::{TimeZone, Utc};
use loan_eligibility_rs::views::to_json_pretty;
use loan_eligibility_rs::{
    CustomerRegistration, InMemoryRepository, LendingService, LoanRequest, Money, Rate,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap(),
    ));
    let mut service = LendingService::new(InMemoryRepository::new());

    let customer = service.register_customer(
        CustomerRegistration {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            age: 28,
            monthly_income: Money::from_major(50_000),
            phone_number: "9876543210".to_string(),
        },
        &time,
    )?;
    println!("{}", to_json_pretty(&customer));

    let request = LoanRequest::new(Money::from_major(100_000), Rate::from_percentage(12), 12);

    let eligibility = service.check_eligibility(customer.customer_id, request, &time)?;
    println!("{}", to_json_pretty(&eligibility));

    let created = service.create_loan(customer.customer_id, request, &time)?;
    println!("{}", to_json_pretty(&created));

    if let Some(loan_id) = created.loan_id {
        println!("{}", to_json_pretty(&service.view_loan(loan_id)?));
    }
    println!("{}", to_json_pretty(&service.view_customer_loans(customer.customer_id)?));

    Ok(())
}
