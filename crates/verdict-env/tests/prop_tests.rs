use proptest::prelude::*;

use verdict_env::wordle::{WORD_LENGTH, feedback, parse_guess};

fn arb_word() -> impl Strategy<Value = String> {
    "[A-Z]{5}"
}

proptest! {
    /// Feedback marks are only ever G, Y, or X, one per guess letter.
    #[test]
    fn feedback_marks_are_well_formed(guess in arb_word(), target in arb_word()) {
        let fb = feedback(&guess, &target);
        let marks: Vec<&str> = fb.split(' ').collect();
        prop_assert_eq!(marks.len(), WORD_LENGTH);
        for mark in marks {
            prop_assert!(mark == "G" || mark == "Y" || mark == "X",
                "unexpected mark {}", mark);
        }
    }

    /// A guess identical to the target is all green.
    #[test]
    fn feedback_self_is_all_green(word in arb_word()) {
        prop_assert_eq!(feedback(&word, &word), "G G G G G");
    }

    /// Credited letters (G or Y) never exceed that letter's count in the
    /// target.
    #[test]
    fn feedback_never_overcredits(guess in arb_word(), target in arb_word()) {
        let marks: Vec<char> = feedback(&guess, &target)
            .split(' ')
            .map(|m| m.chars().next().unwrap())
            .collect();
        for letter in 'A'..='Z' {
            let credited = guess
                .chars()
                .zip(marks.iter())
                .filter(|(g, m)| *g == letter && **m != 'X')
                .count();
            let available = target.chars().filter(|t| *t == letter).count();
            prop_assert!(credited <= available,
                "{} credited {} times but target {} has {}",
                letter, credited, target, available);
        }
    }

    /// Parsed guesses are always uppercase words of the right length.
    #[test]
    fn parse_guess_shape(text in ".{0,80}") {
        if let Some(guess) = parse_guess(&text) {
            prop_assert_eq!(guess.len(), WORD_LENGTH);
            prop_assert!(guess.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    /// A reply that is exactly one word parses to that word.
    #[test]
    fn parse_guess_identity(word in arb_word()) {
        prop_assert_eq!(parse_guess(&word), Some(word));
    }
}
