#[cfg(test)]
mod scanner_tests {
    use rox::error::LoxError;
    use rox::scanner::Scanner;
    use rox::token::{Token, TokenType};

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len(), "token count for {:?}", source);

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn scan_errors(source: &str) -> Vec<LoxError> {
        Scanner::new(source).filter_map(Result::err).collect()
    }

    #[test]
    fn symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn compound_operators_match_greedily() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_token_sequence(
            "var foo while break classy class _bar",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "foo"),
                (TokenType::WHILE, "while"),
                (TokenType::BREAK, "break"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "_bar"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn number_literals_carry_parsed_values() {
        let tokens: Vec<Token> = Scanner::new("42 3.25").filter_map(Result::ok).collect();

        match &tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 42.0),
            other => panic!("expected NUMBER, got {:?}", other),
        }

        match &tokens[1].token_type {
            TokenType::NUMBER(n) => assert_eq!(*n, 3.25),
            other => panic!("expected NUMBER, got {:?}", other),
        }
    }

    #[test]
    fn dot_is_not_part_of_number_without_fraction_digits() {
        assert_token_sequence(
            "7. .5",
            &[
                (TokenType::NUMBER(0.0), "7"),
                (TokenType::DOT, "."),
                (TokenType::DOT, "."),
                (TokenType::NUMBER(0.0), "5"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn string_literal_payload_drops_quotes() {
        let tokens: Vec<Token> = Scanner::new("\"hello\"").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].lexeme, "\"hello\"");
        match &tokens[0].token_type {
            TokenType::STRING(s) => assert_eq!(s, "hello"),
            other => panic!("expected STRING, got {:?}", other),
        }
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens: Vec<Token> = Scanner::new("\"a\nb\" x").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_reports_one_error() {
        let errors = scan_errors("\"abc");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 1] Error: Unterminated string.");
    }

    #[test]
    fn line_comments_are_discarded() {
        assert_token_sequence(
            "1 // the rest is ignored ,.$\n2",
            &[
                (TokenType::NUMBER(0.0), "1"),
                (TokenType::NUMBER(0.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn block_comments_nest() {
        assert_token_sequence(
            "a /* one /* two /* three */ */ still comment */ b",
            &[
                (TokenType::IDENTIFIER, "a"),
                (TokenType::IDENTIFIER, "b"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn unterminated_block_comment_anchors_at_opening_line() {
        let errors = scan_errors("1\n/* open /* inner */\n\n");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 2] Error: Unterminated block comment."
        );
    }

    #[test]
    fn unexpected_characters_each_report_and_are_skipped() {
        let results: Vec<_> = Scanner::new(",.$(#").collect();

        let tokens: Vec<&Token> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let error_count = results.iter().filter(|r| r.is_err()).count();

        assert_eq!(error_count, 2);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].token_type, TokenType::COMMA);
        assert_eq!(tokens[1].token_type, TokenType::DOT);
        assert_eq!(tokens[2].token_type, TokenType::LEFT_PAREN);
        assert_eq!(tokens[3].token_type, TokenType::EOF);

        for error in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                error.to_string().contains("Unexpected character"),
                "unexpected message: {}",
                error
            );
        }
    }

    #[test]
    fn empty_source_yields_only_eof() {
        assert_token_sequence("", &[(TokenType::EOF, "")]);
    }
}
