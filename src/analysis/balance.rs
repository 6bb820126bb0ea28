use crate::scanning::{Delimiters, Paren};

/// Net paren balance over a prefix of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenBalance {
    Balanced,
    ExtraOpen(usize),
    ExtraClose(usize),
}

impl ParenBalance {
    pub fn is_balanced(&self) -> bool {
        matches!(self, ParenBalance::Balanced)
    }
}

/// Count unmatched parens in `text[0, upto)`. The first closer with nothing
/// to close ends the scan.
pub fn check_balance(upto: usize, text: &str) -> ParenBalance {
    let mut count: isize = 0;

    for delimiter in Delimiters::upto(text, upto) {
        match delimiter.paren {
            Paren::Open => count += 1,
            Paren::Close => {
                count -= 1;
                if count < 0 {
                    return ParenBalance::ExtraClose(count.unsigned_abs());
                }
            }
        }
    }

    match count {
        0 => ParenBalance::Balanced,
        n => ParenBalance::ExtraOpen(n.unsigned_abs()),
    }
}
