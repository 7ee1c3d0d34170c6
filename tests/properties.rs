use chrono::{Datelike, NaiveDate};
use loan_eligibility_rs::{
    add_months, calculate_emi, CreditScoringEngine, Customer, DecisionReason, EligibilityEngine,
    Loan, LoanRequest, Money, Rate, Uuid,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn customer(income: i64) -> Customer {
    Customer {
        customer_id: 1,
        first_name: "Prop".to_string(),
        last_name: "Test".to_string(),
        age: 35,
        phone_number: "5550000000".to_string(),
        monthly_income: Money::from_major(income),
        approved_limit: Money::from_major(income * 36),
    }
}

/// Generate a positive principal (1,000 to 5,000,000).
fn arb_amount() -> impl Strategy<Value = Money> {
    (1_000i64..5_000_000i64).prop_map(Money::from_major)
}

/// Generate an annual rate between 0% and 30% in hundredths of a percent.
fn arb_rate() -> impl Strategy<Value = Rate> {
    (0u32..3_000u32).prop_map(|bps| Rate::from_decimal(Decimal::new(bps as i64, 4)))
}

fn arb_tenure() -> impl Strategy<Value = u32> {
    1u32..=360u32
}

fn arb_request() -> impl Strategy<Value = LoanRequest> {
    (arb_amount(), arb_rate(), arb_tenure())
        .prop_map(|(amount, rate, tenure)| LoanRequest::new(amount, rate, tenure))
}

/// Generate an existing loan snapshot for customer 1.
fn arb_loan() -> impl Strategy<Value = Loan> {
    (
        10_000i64..800_000i64,
        100i64..40_000i64,
        1u32..=60u32,
        0u32..=60u32,
        2019i32..=2024i32,
    )
        .prop_map(|(amount, repayment, tenure, paid, year)| {
            let start = NaiveDate::from_ymd_opt(year, 3, 31).unwrap();
            Loan {
                loan_id: Uuid::new_v4(),
                customer_id: 1,
                loan_amount: Money::from_major(amount),
                tenure,
                interest_rate: Rate::from_percentage(12),
                monthly_repayment: Money::from_major(repayment),
                emis_paid_on_time: paid.min(tenure),
                start_date: start,
                end_date: add_months(start, tenure).unwrap(),
            }
        })
}

fn arb_history() -> impl Strategy<Value = Vec<Loan>> {
    prop::collection::vec(arb_loan(), 0..6)
}

proptest! {
    #[test]
    fn prop_decide_is_deterministic(
        income in 10_000i64..500_000i64,
        loans in arb_history(),
        request in arb_request(),
    ) {
        let engine = EligibilityEngine::standard();
        let customer = customer(income);
        let first = engine.evaluate(&customer, &loans, &request, as_of()).unwrap();
        let second = engine.evaluate(&customer, &loans, &request, as_of()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_zero_rate_is_straight_line(amount in arb_amount(), tenure in arb_tenure()) {
        let emi = calculate_emi(amount, Rate::ZERO, tenure).unwrap();
        prop_assert_eq!(emi, amount / Decimal::from(tenure));
    }

    #[test]
    fn prop_affordability_dominates(
        income in 10_000i64..500_000i64,
        loans in arb_history(),
        request in arb_request(),
    ) {
        let engine = EligibilityEngine::standard();
        let customer = customer(income);
        let decision = engine.decide(&customer, &loans, &request, as_of()).unwrap();

        let existing: Money = loans.iter().map(|l| l.monthly_repayment).sum();
        let requested = calculate_emi(request.amount, request.interest_rate, request.tenure).unwrap();
        if existing + requested > customer.monthly_income.fraction(Decimal::new(5, 1)) {
            prop_assert!(!decision.eligible);
            prop_assert_eq!(decision.reason, DecisionReason::AffordabilityExceeded);
        } else {
            prop_assert_ne!(decision.reason, DecisionReason::AffordabilityExceeded);
        }
    }

    #[test]
    fn prop_new_customer_fast_path(
        amount in arb_amount(),
        absurd_rate in 50u32..400u32,
        tenure in 12u32..=60u32,
    ) {
        // income large enough that affordability always holds
        let customer = customer(100_000_000);
        let request = LoanRequest::new(amount, Rate::from_percentage(absurd_rate), tenure);
        let engine = EligibilityEngine::standard();
        let decision = engine.decide(&customer, &[], &request, as_of()).unwrap();

        prop_assert!(decision.eligible);
        prop_assert!(decision.corrected_minimum_rate.is_none());
        prop_assert_eq!(decision.reason, DecisionReason::NewCustomerWithinLimit);
    }

    #[test]
    fn prop_good_loan_never_lowers_score(
        income in 20_000i64..500_000i64,
        loans in arb_history(),
        amount in 1_000i64..50_000i64,
        tenure in 1u32..=24u32,
    ) {
        let customer = customer(income);
        let engine = CreditScoringEngine::default();
        let before = engine.score(&customer, &loans, as_of()).unwrap().score;

        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let good = Loan {
            loan_id: Uuid::new_v4(),
            customer_id: 1,
            loan_amount: Money::from_major(amount),
            tenure,
            interest_rate: Rate::from_percentage(12),
            monthly_repayment: Money::from_major(100),
            emis_paid_on_time: tenure,
            start_date: start,
            end_date: add_months(start, tenure).unwrap(),
        };
        let mut with_good = loans.clone();
        with_good.push(good);

        // a third loan drops count discipline from 10 to 5, and added principal can cross
        // the 80% utilization cap (30 -> 10) or the approved limit (hard fail to 0), so
        // the score only holds steady within a count and utilization band
        let total_before: Money = loans.iter().map(|l| l.loan_amount).sum();
        let total_after = total_before + Money::from_major(amount);
        let limit = customer.approved_limit;
        let cap = limit.fraction(Decimal::new(8, 1));
        prop_assume!(loans.len() != 2);
        prop_assume!(
            total_after <= cap
                || (total_before > cap && total_after <= limit)
                || total_before > limit
        );

        let after = engine.score(&customer, &with_good, as_of()).unwrap().score;
        prop_assert!(after >= before, "score dropped from {} to {}", before, after);
    }

    #[test]
    fn prop_rate_correction_is_consistent(
        income in 10_000i64..500_000i64,
        loans in arb_history(),
        request in arb_request(),
    ) {
        let engine = EligibilityEngine::standard();
        let customer = customer(income);
        let decision = engine.decide(&customer, &loans, &request, as_of()).unwrap();

        if let Some(corrected) = decision.corrected_minimum_rate {
            prop_assert!(request.interest_rate < corrected);

            let resubmitted = request.with_rate(corrected);
            let retry = engine.decide(&customer, &loans, &resubmitted, as_of()).unwrap();
            if retry.reason != DecisionReason::AffordabilityExceeded {
                prop_assert!(retry.eligible);
            }
        }
    }

    #[test]
    fn prop_end_date_keeps_day_or_clamps(
        year in 1990i32..2100i32,
        month in 1u32..=12u32,
        day in 1u32..=31u32,
        months in 0u32..=480u32,
    ) {
        prop_assume!(NaiveDate::from_ymd_opt(year, month, day).is_some());
        let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let end = add_months(start, months).unwrap();

        let elapsed = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
        prop_assert_eq!(elapsed, months as i32);
        prop_assert!(end.day() <= start.day());
        if end.day() < start.day() {
            prop_assert_eq!(end.succ_opt().unwrap().day(), 1);
        }
    }
}
