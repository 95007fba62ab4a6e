//! Table-driven command-line tokenizer.
//!
//! Walks an argument vector one logical option at a time against an
//! [`OptionTable`] and reports what it found:
//! - `--name value`, `--name=value` for long options (exact match only)
//! - `-x value`, `-xvalue` and clustered flags `-abc` for short options
//! - anything the table does not know is handed back as [`Event::Unknown`]
//!   so the caller can treat it as a positional argument
//!
//! Every value carries the [`ArgSlot`] it was read from, so callers can
//! scrub credentials out of the process argument vector afterwards.

// ============================================================================
// Result and Error types
// ============================================================================

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value option was the last token on the line.
    MissingArg(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingArg(s) => write!(f, "The `{}' option requires an argument.", s),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// ArgType
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Plain flag.
    None,
    /// Option requires a value.
    Value,
}

// ============================================================================
// Opt — option descriptor builder
// ============================================================================

#[derive(Debug, Clone)]
pub struct Opt<I> {
    long_name: Option<String>,
    short_name: Option<char>,
    arg_type: ArgType,
    id: I,
}

impl<I: Copy> Opt<I> {
    pub fn new(name: &str, id: I) -> Self {
        Opt {
            long_name: Some(name.to_string()),
            short_name: None,
            arg_type: ArgType::None,
            id,
        }
    }

    /// Descriptor reachable only through its short name.
    pub fn short_only(c: char, id: I) -> Self {
        Opt {
            long_name: None,
            short_name: Some(c),
            arg_type: ArgType::None,
            id,
        }
    }

    pub fn short(mut self, c: char) -> Self {
        self.short_name = Some(c);
        self
    }

    pub fn arg_type(mut self, t: ArgType) -> Self {
        self.arg_type = t;
        self
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn takes_arg(&self) -> bool {
        self.arg_type == ArgType::Value
    }

    pub fn id(&self) -> I {
        self.id
    }
}

// ============================================================================
// OptionTable
// ============================================================================

/// Ordered list of option descriptors for one command.
///
/// Tables compose by concatenation: a shared block is usually included
/// first and the command's own options follow. Lookups return the first
/// matching entry in that order.
#[derive(Debug, Clone)]
pub struct OptionTable<I> {
    entries: Vec<Opt<I>>,
}

impl<I: Copy> OptionTable<I> {
    pub fn new() -> Self {
        OptionTable {
            entries: Vec::new(),
        }
    }

    pub fn option(mut self, opt: Opt<I>) -> Self {
        self.entries.push(opt);
        self
    }

    pub fn include_table(mut self, table: OptionTable<I>) -> Self {
        self.entries.extend(table.entries);
        self
    }

    pub fn find_long(&self, name: &str) -> Option<&Opt<I>> {
        self.entries
            .iter()
            .find(|o| o.long_name.as_deref() == Some(name))
    }

    pub fn find_short(&self, c: char) -> Option<&Opt<I>> {
        self.entries.iter().find(|o| o.short_name == Some(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opt<I>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names that appear on more than one entry. Long names are reported
    /// as `--name`, short names as `-c`.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen_long: Vec<&str> = Vec::new();
        let mut seen_short: Vec<char> = Vec::new();
        let mut dups = Vec::new();
        for opt in &self.entries {
            if let Some(name) = opt.long_name.as_deref() {
                if seen_long.contains(&name) {
                    dups.push(format!("--{}", name));
                } else {
                    seen_long.push(name);
                }
            }
            if let Some(c) = opt.short_name {
                if seen_short.contains(&c) {
                    dups.push(format!("-{}", c));
                } else {
                    seen_short.push(c);
                }
            }
        }
        dups
    }
}

impl<I: Copy> Default for OptionTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Parse results
// ============================================================================

/// Location of a value inside the argument vector: bytes
/// `start..end` of `args[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSlot {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<I> {
    pub id: I,
    /// The option as the user spelled it, `--name` or `-n`.
    pub name: String,
    pub value: Option<String>,
    pub slot: Option<ArgSlot>,
}

impl<I> Match<I> {
    /// The option value, or an empty string for flags.
    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<I> {
    Opt(Match<I>),
    /// Token not described by the table. The parser has already moved
    /// past it.
    Unknown { index: usize, token: String },
    End,
}

// ============================================================================
// Parser
// ============================================================================

/// Cursor over an argument vector.
///
/// `next` is the index of the next unread token; `next_char_arg` points
/// into a clustered short option run that still has characters left.
pub struct Parser<'a> {
    args: &'a [String],
    next: usize,
    next_char_arg: Option<(usize, usize)>,
}

impl<'a> Parser<'a> {
    pub fn new(args: &'a [String], start: usize) -> Self {
        Parser {
            args,
            next: start,
            next_char_arg: None,
        }
    }

    /// Index of the next unread token.
    pub fn index(&self) -> usize {
        self.next
    }

    pub fn args(&self) -> &'a [String] {
        self.args
    }

    pub fn next_opt<I: Copy>(&mut self, table: &OptionTable<I>) -> Result<Event<I>> {
        if let Some((index, offset)) = self.next_char_arg.take() {
            return self.short_run(table, index, offset);
        }
        if self.next >= self.args.len() {
            return Ok(Event::End);
        }

        let args = self.args;
        let index = self.next;
        let arg = &args[index];
        self.next += 1;

        if let Some(body) = arg.strip_prefix("--") {
            if body.is_empty() {
                return Ok(unknown(index, arg));
            }
            let (name, inline) = match body.find('=') {
                Some(pos) => (&body[..pos], Some(pos + 3)),
                None => (body, None),
            };
            let opt = match table.find_long(name) {
                Some(opt) => opt,
                None => return Ok(unknown(index, arg)),
            };
            let spelled = format!("--{}", name);
            if !opt.takes_arg() {
                return Ok(Event::Opt(Match {
                    id: opt.id,
                    name: spelled,
                    value: None,
                    slot: None,
                }));
            }
            let slot = match inline {
                Some(start) => ArgSlot {
                    index,
                    start,
                    end: arg.len(),
                },
                None => self.take_following(&spelled)?,
            };
            return Ok(Event::Opt(self.matched(opt, spelled, slot)));
        }

        if arg.len() > 1 && arg.starts_with('-') {
            return self.short_run(table, index, 1);
        }

        Ok(unknown(index, arg))
    }

    fn short_run<I: Copy>(
        &mut self,
        table: &OptionTable<I>,
        index: usize,
        offset: usize,
    ) -> Result<Event<I>> {
        let args = self.args;
        let arg = &args[index];
        let c = match arg[offset..].chars().next() {
            Some(c) => c,
            None => return self.next_opt(table),
        };
        let opt = match table.find_short(c) {
            Some(opt) => opt,
            None => return Ok(unknown(index, arg)),
        };
        let spelled = format!("-{}", c);
        let rest = offset + c.len_utf8();

        if !opt.takes_arg() {
            if rest < arg.len() {
                self.next_char_arg = Some((index, rest));
            }
            return Ok(Event::Opt(Match {
                id: opt.id,
                name: spelled,
                value: None,
                slot: None,
            }));
        }

        let slot = if rest < arg.len() {
            ArgSlot {
                index,
                start: rest,
                end: arg.len(),
            }
        } else {
            self.take_following(&spelled)?
        };
        Ok(Event::Opt(self.matched(opt, spelled, slot)))
    }

    fn take_following(&mut self, spelled: &str) -> Result<ArgSlot> {
        if self.next >= self.args.len() {
            return Err(Error::MissingArg(spelled.to_string()));
        }
        let index = self.next;
        self.next += 1;
        Ok(ArgSlot {
            index,
            start: 0,
            end: self.args[index].len(),
        })
    }

    fn matched<I: Copy>(&self, opt: &Opt<I>, name: String, slot: ArgSlot) -> Match<I> {
        let value = self.args[slot.index][slot.start..slot.end].to_string();
        Match {
            id: opt.id,
            name,
            value: Some(value),
            slot: Some(slot),
        }
    }
}

fn unknown<I>(index: usize, token: &str) -> Event<I> {
    Event::Unknown {
        index,
        token: token.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Id {
        All,
        Brief,
        Count,
        File,
        Name,
        Quiet,
    }

    fn table() -> OptionTable<Id> {
        OptionTable::new()
            .option(Opt::new("all", Id::All).short('a'))
            .option(Opt::new("brief", Id::Brief).short('b'))
            .option(Opt::new("count", Id::Count).short('c'))
            .option(Opt::new("file", Id::File).short('f').arg_type(ArgType::Value))
            .option(Opt::new("name", Id::Name).arg_type(ArgType::Value))
            .option(Opt::new("silent", Id::Quiet).short('q'))
            .option(Opt::new("quiet", Id::Quiet))
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn collect(args: &[String]) -> Result<Vec<Event<Id>>> {
        let table = table();
        let mut parser = Parser::new(args, 0);
        let mut out = Vec::new();
        loop {
            let ev = parser.next_opt(&table)?;
            if ev == Event::End {
                return Ok(out);
            }
            out.push(ev);
        }
    }

    fn ids_and_values(events: &[Event<Id>]) -> Vec<(Id, Option<String>)> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Opt(m) => Some((m.id, m.value.clone())),
                _ => None,
            })
            .collect()
    }

    // -- long options --

    #[test]
    fn long_value_separate_and_inline_agree() {
        let a = collect(&argv(&["--name", "foo"])).unwrap();
        let b = collect(&argv(&["--name=foo"])).unwrap();
        assert_eq!(ids_and_values(&a), ids_and_values(&b));
        assert_eq!(ids_and_values(&a), vec![(Id::Name, Some("foo".into()))]);
    }

    #[test]
    fn long_inline_value_keeps_later_equals() {
        let ev = collect(&argv(&["--name=a=b"])).unwrap();
        assert_eq!(ids_and_values(&ev), vec![(Id::Name, Some("a=b".into()))]);
    }

    #[test]
    fn long_value_option_takes_dash_token() {
        let ev = collect(&argv(&["--name", "-p 2222"])).unwrap();
        assert_eq!(ids_and_values(&ev), vec![(Id::Name, Some("-p 2222".into()))]);
    }

    #[test]
    fn long_flag_ignores_inline_value() {
        let ev = collect(&argv(&["--all=yes"])).unwrap();
        assert_eq!(ids_and_values(&ev), vec![(Id::All, None)]);
    }

    #[test]
    fn long_match_is_exact() {
        let ev = collect(&argv(&["--nam", "x"])).unwrap();
        assert_eq!(
            ev,
            vec![
                Event::Unknown {
                    index: 0,
                    token: "--nam".into()
                },
                Event::Unknown {
                    index: 1,
                    token: "x".into()
                },
            ]
        );
    }

    #[test]
    fn unknown_long_reports_whole_token() {
        let ev = collect(&argv(&["--bogus=1"])).unwrap();
        assert_eq!(
            ev,
            vec![Event::Unknown {
                index: 0,
                token: "--bogus=1".into()
            }]
        );
    }

    #[test]
    fn alias_maps_to_same_id() {
        let ev = collect(&argv(&["--quiet", "--silent", "-q"])).unwrap();
        assert_eq!(
            ids_and_values(&ev),
            vec![(Id::Quiet, None), (Id::Quiet, None), (Id::Quiet, None)]
        );
    }

    // -- short options --

    #[test]
    fn clustered_flags_match_separate_flags() {
        let a = collect(&argv(&["-a", "-b", "-c"])).unwrap();
        let b = collect(&argv(&["-abc"])).unwrap();
        assert_eq!(ids_and_values(&a), ids_and_values(&b));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn short_value_inline_and_separate_agree() {
        let a = collect(&argv(&["-ffile.img"])).unwrap();
        let b = collect(&argv(&["-f", "file.img"])).unwrap();
        assert_eq!(ids_and_values(&a), ids_and_values(&b));
        assert_eq!(ids_and_values(&a), vec![(Id::File, Some("file.img".into()))]);
    }

    #[test]
    fn cluster_ends_in_value_option() {
        let ev = collect(&argv(&["-abfout", "rest"])).unwrap();
        assert_eq!(
            ids_and_values(&ev),
            vec![
                (Id::All, None),
                (Id::Brief, None),
                (Id::File, Some("out".into()))
            ]
        );
        assert!(matches!(ev.last(), Some(Event::Unknown { index: 1, .. })));
    }

    #[test]
    fn short_inline_value_keeps_equals() {
        let ev = collect(&argv(&["-f=x"])).unwrap();
        assert_eq!(ids_and_values(&ev), vec![(Id::File, Some("=x".into()))]);
    }

    #[test]
    fn unknown_short_reports_whole_token() {
        let ev = collect(&argv(&["-az"])).unwrap();
        assert_eq!(
            ev,
            vec![
                Event::Opt(Match {
                    id: Id::All,
                    name: "-a".into(),
                    value: None,
                    slot: None
                }),
                Event::Unknown {
                    index: 0,
                    token: "-az".into()
                },
            ]
        );
    }

    #[test]
    fn lone_dashes_are_positional() {
        let ev = collect(&argv(&["-", "--"])).unwrap();
        assert!(matches!(ev[0], Event::Unknown { index: 0, .. }));
        assert!(matches!(ev[1], Event::Unknown { index: 1, .. }));
    }

    // -- missing values --

    #[test]
    fn missing_long_value() {
        let err = collect(&argv(&["-a", "--name"])).unwrap_err();
        assert_eq!(err, Error::MissingArg("--name".into()));
        assert_eq!(
            err.to_string(),
            "The `--name' option requires an argument."
        );
    }

    #[test]
    fn missing_short_value() {
        let err = collect(&argv(&["-af"])).unwrap_err();
        assert_eq!(err, Error::MissingArg("-f".into()));
    }

    // -- slots --

    #[test]
    fn slots_point_at_value_bytes() {
        let args = argv(&["--name=secret", "-fpw", "--name", "other"]);
        let ev = collect(&args).unwrap();
        let slots: Vec<ArgSlot> = ev
            .iter()
            .filter_map(|e| match e {
                Event::Opt(m) => m.slot,
                _ => None,
            })
            .collect();
        assert_eq!(
            slots,
            vec![
                ArgSlot {
                    index: 0,
                    start: 7,
                    end: 13
                },
                ArgSlot {
                    index: 1,
                    start: 2,
                    end: 4
                },
                ArgSlot {
                    index: 3,
                    start: 0,
                    end: 5
                },
            ]
        );
        for s in slots {
            let text = &args[s.index][s.start..s.end];
            assert!(["secret", "pw", "other"].contains(&text));
        }
    }

    // -- parser position --

    #[test]
    fn start_offset_skips_leading_tokens() {
        let args = argv(&["set", "vm", "-a"]);
        let table = table();
        let mut parser = Parser::new(&args, 2);
        assert!(matches!(
            parser.next_opt(&table).unwrap(),
            Event::Opt(Match { id: Id::All, .. })
        ));
        assert_eq!(parser.next_opt(&table).unwrap(), Event::End);
        assert_eq!(parser.index(), 3);
    }

    // -- table --

    #[test]
    fn first_entry_wins_and_duplicates_are_reported() {
        let t = table()
            .include_table(OptionTable::new().option(Opt::new("all", Id::Count).short('b')));
        assert_eq!(t.find_long("all").map(|o| o.id()), Some(Id::All));
        assert_eq!(t.find_short('b').map(|o| o.id()), Some(Id::Brief));
        assert_eq!(t.duplicate_names(), vec!["--all".to_string(), "-b".to_string()]);
        assert!(table().duplicate_names().is_empty());
    }
}
