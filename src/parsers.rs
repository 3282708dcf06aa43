#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use chrono::{NaiveDate, NaiveDateTime};

use crate::grade::{QuestionKey, ScoreRecord};

peg::parser! {
    /// includes the fixed grammars for grader folders, comment lines,
    /// submission timestamps and grade-book rows.
    pub grammar parser() for str {
        /// matches any number of spaces or tabs
        rule ws() = quiet!{[' ' | '\t']*}

        /// matches at least one space or tab
        rule ws1() = quiet!{[' ' | '\t']+}

        /// matches any sequence of 1 or more numbers
        rule number() -> u32
            = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

        /// matches the separator between last and first name, eg. `, ` or `_ `
        rule name_separator()
            = [',' | '_'] ws1()

        /// matches a roster id, letters, digits and underscores
        rule external_id() -> &'input str
            = $([c if c.is_alphanumeric() || c == '_']+)

        /// matches the parenthesised id that must end the folder name
        rule id_suffix() -> &'input str
            = ws() "(" id:external_id() ")" ![_] { id }

        /// matches the last name separator in the rest of the input
        rule final_separator()
            = name_separator() (!name_separator() [_])* ![_]

        /// matches everything up to the last name separator, so
        /// `Smith, Jr., John` keeps `Smith, Jr.` as the last name
        rule last_name() -> &'input str
            = $((!final_separator() [_])+)

        /// matches everything up to the trailing id
        rule first_name() -> &'input str
            = $((!id_suffix() [_])*)

        /// splits a folder name like `Doe, Jane (jdoe42)` into last name,
        /// first name and id
        pub rule identity() -> (&'input str, &'input str, &'input str)
            = last:last_name() name_separator() first:first_name() id:id_suffix()
            { (last.trim(), first.trim(), id) }

        /// matches a single subpart letter
        rule letter() -> char
            = c:[c if c.is_ascii_alphabetic()] { c }

        /// matches `(a)` or a bare `a` after a question number
        rule subpart() -> char
            = "(" ws() c:letter() ws() ")" { c }
            / letter()

        /// matches a non-negative decimal score such as `7.5`
        rule score() -> f64
            = s:$(['0'..='9' | '.']+) {? s.parse().or(Err("decimal score")) }

        /// matches the rest of the line verbatim
        rule rest() -> &'input str
            = $([_]*)

        /// parses one comment line, eg. `Q3(a): 7.5/10 nice work`
        pub rule answer_line() -> (QuestionKey, ScoreRecord)
            = ['Q' | 'q']? n:number() ws() s:subpart()? ws() ":" ws()
              awarded:score() ws() "/" ws() possible:score()
              comment:rest()
            {
                (
                    QuestionKey::new(n, s),
                    ScoreRecord::new(awarded, possible, comment),
                )
            }

        /// matches exactly two digits
        rule d2() -> u32
            = s:$(['0'..='9']*<2>) {? s.parse().or(Err("2 digits")) }

        /// matches exactly three digits
        rule d3() -> u32
            = s:$(['0'..='9']*<3>) {? s.parse().or(Err("3 digits")) }

        /// matches exactly four digits
        rule d4() -> i32
            = s:$(['0'..='9']*<4>) {? s.parse().or(Err("4 digits")) }

        /// matches trailing whitespace including line endings
        rule line_end() = quiet!{[' ' | '\t' | '\r' | '\n']*}

        /// parses a `YYYYMMDDHHMMSSmmm` submission timestamp
        pub rule timestamp() -> NaiveDateTime
            = line_end()
              year:d4() month:d2() day:d2()
              hour:d2() minute:d2() second:d2() milli:d3()
              line_end()
            {?
                NaiveDate::from_ymd_opt(year, month, day)
                    .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
                    .ok_or("a valid calendar timestamp")
            }

        /// matches one character inside a quoted CSV field
        rule quoted_char() -> char
            = "\"\"" { '"' }
            / c:[^'"'] { c }

        /// matches a double-quoted CSV field
        rule quoted_field() -> String
            = "\"" chars:quoted_char()* "\"" { chars.into_iter().collect() }

        /// matches an unquoted CSV field
        rule bare_field() -> String
            = s:$([^',' | '"' | '\r' | '\n']*) { s.to_string() }

        /// parses one line of a grade-book CSV into its fields
        pub rule csv_row() -> Vec<String>
            = fields:(quoted_field() / bare_field()) ** "," ['\r']?
            { fields }
    }
}
