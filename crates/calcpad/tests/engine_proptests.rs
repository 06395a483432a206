//! Property-based tests for the calculator engine
//!
//! Random token streams must never break the display invariants.

use calcpad::engine::{CurrentOperand, DisplayState, InputToken, Operation};
use proptest::prelude::*;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

fn token_strategy() -> impl Strategy<Value = InputToken> {
    prop_oneof![
        4 => digit_strategy().prop_map(InputToken::Digit),
        1 => Just(InputToken::DecimalPoint),
        2 => operation_strategy().prop_map(InputToken::Operation),
        1 => Just(InputToken::Equals),
        1 => Just(InputToken::Clear),
        1 => Just(InputToken::Delete),
    ]
}

fn entry_token_strategy() -> impl Strategy<Value = InputToken> {
    prop_oneof![
        4 => digit_strategy().prop_map(InputToken::Digit),
        1 => Just(InputToken::DecimalPoint),
    ]
}

fn run(tokens: &[InputToken]) -> DisplayState {
    tokens
        .iter()
        .fold(DisplayState::new(), |state, token| state.reduce(*token))
}

fn assert_invariants(state: &DisplayState) -> Result<(), TestCaseError> {
    if let CurrentOperand::Entry(text) = state.current() {
        prop_assert!(!text.is_empty());
        prop_assert!(text.matches('.').count() <= 1, "{text}");
    }
    prop_assert_eq!(state.operation().is_none(), state.previous().is_empty());
    Ok(())
}

// ===== Invariants =====

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_token(
        tokens in prop::collection::vec(token_strategy(), 0..60),
    ) {
        let mut state = DisplayState::new();
        for token in tokens {
            state.apply(token);
            assert_invariants(&state)?;
        }
    }

    #[test]
    fn prop_clear_returns_initial_state(tokens in prop::collection::vec(token_strategy(), 0..60)) {
        let state = run(&tokens).reduce(InputToken::Clear);
        prop_assert_eq!(state, DisplayState::new());
    }

    #[test]
    fn prop_no_redundant_leading_zero(
        tokens in prop::collection::vec(entry_token_strategy(), 1..20),
    ) {
        let state = run(&tokens);
        let text = state.current_text();
        if text.starts_with('0') && text.len() > 1 {
            prop_assert_eq!(text.as_bytes()[1], b'.', "{}", text);
        }
    }

    #[test]
    fn prop_decimal_point_idempotent(tokens in prop::collection::vec(token_strategy(), 0..40)) {
        let once = run(&tokens).reduce(InputToken::DecimalPoint);
        let twice = once.clone().reduce(InputToken::DecimalPoint);
        prop_assert_eq!(once.current(), twice.current());
    }

    #[test]
    fn prop_delete_never_empties(tokens in prop::collection::vec(token_strategy(), 0..40)) {
        let state = run(&tokens).reduce(InputToken::Delete);
        prop_assert!(!state.current_text().is_empty());
    }

    #[test]
    fn prop_error_only_left_by_clear(
        lead in 1u8..=9u8,
        rest in prop::collection::vec(digit_strategy(), 0..4),
        after in prop::collection::vec(token_strategy(), 0..20),
    ) {
        let mut tokens = vec![InputToken::Digit(lead)];
        tokens.extend(rest.into_iter().map(InputToken::Digit));
        tokens.extend([
            InputToken::Operation(Operation::Divide),
            InputToken::Digit(0),
            InputToken::Equals,
        ]);
        let mut state = run(&tokens);
        prop_assert!(state.is_error());

        for token in after {
            state.apply(token);
            if token == InputToken::Clear {
                prop_assert_eq!(&state, &DisplayState::new());
                break;
            }
            prop_assert!(state.is_error());
        }
    }

    #[test]
    fn prop_addition_of_integers(a in 1u32..100_000, b in 0u32..100_000) {
        let mut tokens = digits(a);
        tokens.push(InputToken::Operation(Operation::Add));
        tokens.extend(digits(b));
        tokens.push(InputToken::Equals);
        let state = run(&tokens);
        prop_assert_eq!(state.current_text(), (u64::from(a) + u64::from(b)).to_string());
    }

    #[test]
    fn prop_operation_then_equals_reuses_operand(a in 1u32..10_000, op in operation_strategy()) {
        let mut tokens = digits(a);
        tokens.push(InputToken::Operation(op));
        let pending = run(&tokens);
        prop_assert_eq!(pending.current_text(), a.to_string());

        let state = pending.reduce(InputToken::Equals);
        let x = f64::from(a);
        let expected = calcpad::engine::format_number(calcpad::engine::round_to(
            op.apply(x, x).unwrap(),
            8,
        ));
        prop_assert_eq!(state.current_text(), expected);
    }
}

fn digits(n: u32) -> Vec<InputToken> {
    n.to_string()
        .chars()
        .map(|c| InputToken::Digit(c.to_digit(10).unwrap() as u8))
        .collect()
}
