/// custom policy - tighter affordability loaded from json, plus a repayment schedule
use chrono::NaiveDate;
use loan_eligibility_rs::{
    Customer, EligibilityEngine, LoanRequest, Money, PolicyConfig, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut policy = PolicyConfig::standard();
    policy.affordability.max_installment_to_income = rust_decimal_macros::dec!(0.4);
    let json = serde_json::to_string_pretty(&policy)?;
    println!("{}", json);

    let engine = EligibilityEngine::new(PolicyConfig::from_json(&json)?)?;

    let customer = Customer {
        customer_id: 7,
        first_name: "Ravi".to_string(),
        last_name: "Kumar".to_string(),
        age: 45,
        phone_number: "9988776655".to_string(),
        monthly_income: Money::from_major(40_000),
        approved_limit: Money::from_major(1_440_000),
    };
    let today = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or("invalid date")?;
    let request = LoanRequest::new(Money::from_major(300_000), Rate::from_percentage(14), 24);

    let outcome = engine.evaluate(&customer, &[], &request, today)?;
    println!(
        "eligible: {} ({}), installment {}",
        outcome.is_eligible(),
        outcome.decision.reason.summary(),
        outcome.periodic_payment.round_dp(2)
    );

    let schedule = loan_eligibility_rs::AmortizationSchedule::generate(
        request.amount,
        outcome.applied_rate,
        request.tenure,
        today,
    )?;
    for payment in schedule.payments.iter().take(3) {
        println!(
            "#{} {} pay {} (interest {}, principal {}) balance {}",
            payment.payment_number,
            payment.payment_date,
            payment.payment_amount.round_dp(2),
            payment.interest_portion.round_dp(2),
            payment.principal_portion.round_dp(2),
            payment.ending_balance.round_dp(2),
        );
    }
    println!("total interest: {}", schedule.total_interest.round_dp(2));

    Ok(())
}
