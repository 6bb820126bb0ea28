#[cfg(test)]
mod verify {
    use std::fs;
    use std::path::{Path, PathBuf};

    use turbolisp::analysis::ParenBalance;
    use turbolisp::parsing;
    use turbolisp::reader::{
        FormCompletion, ManualClock, ReaderEngine, SymbolType, CACHE_TIMEOUT,
    };
    use turbolisp::scanning::{TextRange, TokenKind};

    fn incomplete(expecting: &str) -> FormCompletion {
        FormCompletion::Incomplete {
            expecting: expecting.to_string(),
        }
    }

    #[test]
    fn completion_verdicts() {
        let engine = ReaderEngine::new();

        assert_eq!(engine.is_form_complete("(foo (bar"), incomplete("2 closing parentheses"));
        assert_eq!(engine.is_form_complete("(foo (bar)"), incomplete("1 closing parenthesis"));
        assert_eq!(
            engine.is_form_complete("(foo))"),
            FormCompletion::Invalid {
                error: "1 extra closing parenthesis".to_string()
            }
        );
        assert_eq!(
            engine.is_form_complete("(a)))"),
            FormCompletion::Invalid {
                error: "2 extra closing parentheses".to_string()
            }
        );
        assert_eq!(engine.is_form_complete("  \n "), incomplete("form"));
        assert_eq!(engine.is_form_complete("42"), incomplete("complete form"));
        assert_eq!(engine.is_form_complete("  (foo \"(\")  "), FormCompletion::Complete);
        assert_eq!(engine.is_form_complete("'(a b)"), FormCompletion::Complete);
        assert_eq!(engine.is_form_complete("`(a ,b)"), FormCompletion::Complete);
    }

    #[test]
    fn viewport_tokens_are_filtered() {
        let mut engine = ReaderEngine::new();
        let text = "(a) (b c)";

        let tokens = engine.tokenize_viewport(text, TextRange::new(7, 8));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(text), "c");

        let viewport = engine.analyze_viewport(text, TextRange::new(7, 8));
        assert_eq!(viewport.range, TextRange::new(4, 9));
        assert_eq!(viewport.context.depth, 0);
        assert_eq!(viewport.tokens.len(), 4);

        // a bare cursor intersects nothing
        assert!(engine
            .tokenize_viewport(text, TextRange::empty(6))
            .is_empty());
    }

    #[test]
    fn viewport_context_is_at_form_start() {
        let mut engine = ReaderEngine::new();
        let text = "(defun f (x)\n  (print x))";
        let position = text
            .find("print")
            .unwrap();

        let viewport = engine.analyze_viewport(text, TextRange::new(position, position + 5));
        assert_eq!(&text[viewport.range.start..viewport.range.end], "(print x)");
        assert_eq!(viewport.context.depth, 1);
        assert_eq!(viewport.tokens[1].kind, TokenKind::Symbol);
    }

    #[test]
    fn cache_within_timeout() {
        let clock = ManualClock::new();
        let mut engine = ReaderEngine::with_clock(clock.clone());
        let text = "(defun foo (x) (+ x 1))";
        let range = TextRange::new(16, 17);

        let first = engine.tokenize_viewport(text, range);
        clock.advance(CACHE_TIMEOUT / 2);
        let second = engine.tokenize_viewport(text, range);

        assert_eq!(first, second);
        assert_eq!(engine.cache_len(), 1);
    }

    #[test]
    fn cache_after_timeout() {
        let clock = ManualClock::new();
        let mut engine = ReaderEngine::with_clock(clock.clone());
        let text = "(a 1) (b 2)";

        let first = engine.tokenize_viewport(text, TextRange::new(1, 2));
        engine.tokenize_viewport(text, TextRange::new(7, 8));
        assert_eq!(engine.cache_len(), 2);

        clock.advance(CACHE_TIMEOUT);

        // recomputed, and the other stale entry is reaped on the way
        let again = engine.tokenize_viewport(text, TextRange::new(1, 2));
        assert_eq!(first, again);
        assert_eq!(engine.cache_len(), 1);
    }

    #[test]
    fn cache_sees_changed_content() {
        let mut engine = ReaderEngine::new();
        let range = TextRange::new(1, 4);

        let before = engine.tokenize_viewport("(foo)", range);
        let after = engine.tokenize_viewport("(123)", range);

        assert_eq!(before[0].kind, TokenKind::Symbol);
        assert_eq!(after[0].kind, TokenKind::Number);
        assert_eq!(engine.cache_len(), 2);
    }

    #[test]
    fn symbols() {
        let engine = ReaderEngine::new();
        let text = "(defun foo (x) :key)";

        let info = engine
            .symbol_at(8, text)
            .unwrap();
        assert_eq!(info.name, "foo");
        assert_eq!(info.range, TextRange::new(7, 10));
        assert_eq!(info.symbol_type, SymbolType::Unknown);
        assert_eq!(info.context.depth, 1);
        assert_eq!(info.context.form_type.as_deref(), Some("defun"));

        let info = engine
            .symbol_at(3, text)
            .unwrap();
        assert_eq!(info.name, "defun");
        assert_eq!(info.symbol_type, SymbolType::SpecialForm);

        let info = engine
            .symbol_at(16, text)
            .unwrap();
        assert_eq!(info.name, ":key");
        assert_eq!(info.symbol_type, SymbolType::Keyword);

        // just past the end of a symbol still finds it
        let info = engine
            .symbol_at(10, text)
            .unwrap();
        assert_eq!(info.name, "foo");

        assert_eq!(engine.symbol_at(0, text), None);
        assert_eq!(engine.symbol_at(text.len(), text), None);
        assert_eq!(engine.symbol_at(0, ""), None);
    }

    #[test]
    fn form_boundaries() {
        let engine = ReaderEngine::new();
        let text = "(a) (b)";

        assert_eq!(engine.form_boundaries_at(5, text), Some(TextRange::new(4, 7)));
        assert_eq!(engine.form_boundaries_at(1, text), Some(TextRange::new(0, 3)));
        assert_eq!(engine.form_boundaries_at(0, ""), None);
        assert_eq!(engine.form_boundaries_at(8, text), None);
    }

    #[test]
    fn matching_and_indent() {
        let engine = ReaderEngine::new();
        let text = "(if (> a b)\n    a\n    \"(\")";

        assert_eq!(engine.find_matching_paren(0, text), Some(text.len() - 1));
        assert_eq!(engine.find_matching_paren(4, text), Some(10));
        assert_eq!(engine.find_matching_paren(10, text), Some(4));
        assert_eq!(engine.find_matching_paren(1, text), None);

        assert_eq!(engine.calculate_indent(1, text).level, 2);
        assert_eq!(engine.paren_balance(4, text), ParenBalance::ExtraOpen(1));
    }

    fn lisp_files(dir: &Path) -> Vec<PathBuf> {
        assert!(dir.exists(), "{:?} directory missing", dir);

        let entries = fs::read_dir(dir).expect("Failed to read directory");

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();

            if path
                .extension()
                .and_then(|s| s.to_str())
                == Some("lisp")
            {
                files.push(path);
            }
        }

        assert!(!files.is_empty(), "No .lisp files found in {:?}", dir);
        files
    }

    #[test]
    fn ensure_samples_read() {
        let engine = ReaderEngine::new();
        let mut failures = Vec::new();

        for file in lisp_files(Path::new("tests/samples/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let balanced = engine
                .paren_balance(content.len(), &content)
                .is_balanced();

            match parsing::parse_all(&content) {
                Ok(forms) if balanced && !forms.is_empty() => {}
                Ok(_) => {
                    println!("File {:?} is not a balanced sequence of forms", file);
                    failures.push(file);
                }
                Err(e) => {
                    println!("File {:?} failed to read: {}", file, e);
                    failures.push(file);
                }
            }
        }

        if !failures.is_empty() {
            panic!("{} sample files failed to read", failures.len());
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let engine = ReaderEngine::new();
        let mut unexpected_successes = Vec::new();

        for file in lisp_files(Path::new("tests/broken/")) {
            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let balanced = engine
                .paren_balance(content.len(), &content)
                .is_balanced();

            if balanced
                && parsing::parse_all(&content).is_ok()
                && engine
                    .is_form_complete(&content)
                    .is_complete()
            {
                println!("File {:?} unexpectedly read successfully", file);
                unexpected_successes.push(file);
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should not read successfully, but {} files passed",
                unexpected_successes.len()
            );
        }
    }
}
