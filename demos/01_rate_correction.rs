/// rate correction - a weak history is offered the tier minimum rate
use chrono::{Duration, TimeZone, Utc};
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
        Utc.with_ymd_and_hms(2023, 3, 1, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let mut service = LendingService::new(InMemoryRepository::new());

    let customer = service.register_customer(
        CustomerRegistration {
            first_name: "Priya".to_string(),
            last_name: "Shah".to_string(),
            age: 36,
            monthly_income: Money::from_major(100_000),
            phone_number: "9123456780".to_string(),
        },
        &time,
    )?;

    // build up three long loans
    for _ in 0..3 {
        let request = LoanRequest::new(Money::from_major(1_000_000), Rate::from_percentage(10), 240);
        service.create_loan(customer.customer_id, request, &time)?;
    }

    controller.advance(Duration::days(400));
    println!("now: {}", time.now().format("%Y-%m-%d"));

    let request = LoanRequest::new(Money::from_major(50_000), Rate::from_percentage(11), 12);
    let response = service.check_eligibility(customer.customer_id, request, &time)?;
    println!("{}", to_json_pretty(&response));

    if let Some(corrected) = response.corrected_interest_rate {
        let retry = request.with_rate(Rate::from_percentage_decimal(corrected));
        let created = service.create_loan(customer.customer_id, retry, &time)?;
        println!("{}", to_json_pretty(&created));
    }

    for event in service.take_events() {
        println!("{:?}", event);
    }

    Ok(())
}
