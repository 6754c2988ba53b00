use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Look { target: Option<String> },
    Take { item: String },
    Use { item: String },
    Open { target: String },
    Enter { target: String },
    TalkTo { npc: String },
    Inventory,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParseError {
    prompt: String,
}

impl CommandParseError {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

type ParseFn = dyn Fn(&[&str]) -> Result<ParsedCommand, CommandParseError> + Send + Sync;

pub struct VerbSpec {
    name: String,
    usage: String,
    parse: Box<ParseFn>,
}

impl VerbSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(&self, args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
        (self.parse)(args)
    }
}

pub struct VerbRegistry {
    specs: Vec<VerbSpec>,
    lookup_by_lower_name: HashMap<String, usize>,
}

impl Default for VerbRegistry {
    fn default() -> Self {
        Self::with_builtin_verbs()
    }
}

impl VerbRegistry {
    pub fn new() -> Self {
        Self {
            specs: Vec::new(),
            lookup_by_lower_name: HashMap::new(),
        }
    }

    pub fn with_builtin_verbs() -> Self {
        let mut registry = Self::new();
        let builtins: [(&str, &str, fn(&[&str]) -> Result<ParsedCommand, CommandParseError>); 8] = [
            ("look", "look", parse_look),
            ("take", "take [item]", parse_take),
            ("use", "use [item]", parse_use),
            ("open", "open [door]", parse_open),
            ("enter", "enter [door]", parse_enter),
            ("talk", "talk to [person]", parse_talk),
            ("inventory", "inventory", parse_inventory),
            ("help", "", parse_help),
        ];
        for (name, usage, parse) in builtins {
            registry
                .register(name, usage, parse)
                .expect("built-in verb registration should not fail");
        }
        for (alias, verb) in [("examine", "look"), ("get", "take"), ("i", "inventory")] {
            registry
                .register_alias(alias, verb)
                .expect("built-in alias registration should not fail");
        }
        registry
    }

    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        usage: impl Into<String>,
        parse: F,
    ) -> Result<(), String>
    where
        F: Fn(&[&str]) -> Result<ParsedCommand, CommandParseError> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("verb name cannot be empty".to_string());
        }
        let lower = name.to_lowercase();
        if self.lookup_by_lower_name.contains_key(&lower) {
            return Err(format!("duplicate verb registration: {name}"));
        }

        self.specs.push(VerbSpec {
            name,
            usage: usage.into(),
            parse: Box::new(parse),
        });
        self.lookup_by_lower_name.insert(lower, self.specs.len() - 1);
        Ok(())
    }

    pub fn register_alias(&mut self, alias: &str, verb: &str) -> Result<(), String> {
        let lower = alias.to_lowercase();
        if self.lookup_by_lower_name.contains_key(&lower) {
            return Err(format!("duplicate verb registration: {alias}"));
        }
        let index = *self
            .lookup_by_lower_name
            .get(&verb.to_lowercase())
            .ok_or_else(|| format!("alias '{alias}' targets unknown verb '{verb}'"))?;
        self.lookup_by_lower_name.insert(lower, index);
        Ok(())
    }

    pub fn lookup(&self, input_name: &str) -> Option<&VerbSpec> {
        let index = self.lookup_by_lower_name.get(&input_name.to_lowercase())?;
        self.specs.get(*index)
    }

    pub fn help_summary(&self) -> String {
        let usages: Vec<&str> = self
            .specs
            .iter()
            .filter(|spec| !spec.usage.is_empty())
            .map(|spec| spec.usage.as_str())
            .collect();
        format!("Commands: {}", usages.join(", "))
    }
}

fn rest(args: &[&str]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}

fn parse_look(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let args = match args.split_first() {
        Some((&"at", tail)) => {
            if tail.is_empty() {
                return Err(CommandParseError::new("Look at what?"));
            }
            tail
        }
        _ => args,
    };
    Ok(ParsedCommand::Look { target: rest(args) })
}

fn parse_take(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let item = rest(args).ok_or_else(|| CommandParseError::new("Take what?"))?;
    Ok(ParsedCommand::Take { item })
}

fn parse_use(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let item = rest(args).ok_or_else(|| CommandParseError::new("Use what?"))?;
    Ok(ParsedCommand::Use { item })
}

fn parse_open(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let target = rest(args).ok_or_else(|| CommandParseError::new("Open what?"))?;
    Ok(ParsedCommand::Open { target })
}

fn parse_enter(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let target = rest(args).ok_or_else(|| CommandParseError::new("Enter what?"))?;
    Ok(ParsedCommand::Enter { target })
}

fn parse_talk(args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    let Some((&"to", tail)) = args.split_first() else {
        return Err(CommandParseError::new("Did you mean 'talk to [person]'?"));
    };
    let npc = rest(tail).ok_or_else(|| CommandParseError::new("Talk to whom?"))?;
    Ok(ParsedCommand::TalkTo { npc })
}

fn parse_inventory(_args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    Ok(ParsedCommand::Inventory)
}

fn parse_help(_args: &[&str]) -> Result<ParsedCommand, CommandParseError> {
    Ok(ParsedCommand::Help)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ParsedCommand, CommandParseError> {
        let registry = VerbRegistry::with_builtin_verbs();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let spec = registry.lookup(tokens[0]).expect("known verb");
        spec.parse(&tokens[1..])
    }

    #[test]
    fn help_lists_verbs_in_registration_order() {
        assert_eq!(
            VerbRegistry::with_builtin_verbs().help_summary(),
            "Commands: look, take [item], use [item], open [door], enter [door], \
             talk to [person], inventory"
        );
    }

    #[test]
    fn aliases_resolve_to_the_same_verb() {
        let registry = VerbRegistry::with_builtin_verbs();
        assert_eq!(registry.lookup("examine").map(VerbSpec::name), Some("look"));
        assert_eq!(registry.lookup("GET").map(VerbSpec::name), Some("take"));
        assert_eq!(registry.lookup("i").map(VerbSpec::name), Some("inventory"));
        assert!(registry.lookup("xyzzy").is_none());
    }

    #[test]
    fn duplicate_and_dangling_registrations_are_rejected() {
        let mut registry = VerbRegistry::with_builtin_verbs();
        assert!(registry.register("Look", "", parse_help).is_err());
        assert!(registry.register(" ", "", parse_help).is_err());
        assert!(registry.register_alias("peer", "stare").is_err());
        assert!(registry.register_alias("get", "look").is_err());
    }

    #[test]
    fn look_strips_leading_at_and_joins_words() {
        assert_eq!(parse("look"), Ok(ParsedCommand::Look { target: None }));
        assert_eq!(
            parse("look at old man"),
            Ok(ParsedCommand::Look {
                target: Some("old man".to_string())
            })
        );
        assert_eq!(
            parse("examine rock"),
            Ok(ParsedCommand::Look {
                target: Some("rock".to_string())
            })
        );
        assert_eq!(parse("look at"), Err(CommandParseError::new("Look at what?")));
    }

    #[test]
    fn verbs_without_arguments_prompt_for_one() {
        for (line, prompt) in [
            ("take", "Take what?"),
            ("get", "Take what?"),
            ("use", "Use what?"),
            ("open", "Open what?"),
            ("enter", "Enter what?"),
        ] {
            let error = parse(line).expect_err("missing argument");
            assert_eq!(error.prompt(), prompt);
        }
    }

    #[test]
    fn talk_requires_to_and_a_name() {
        assert_eq!(
            parse("talk"),
            Err(CommandParseError::new("Did you mean 'talk to [person]'?"))
        );
        assert_eq!(
            parse("talk old man"),
            Err(CommandParseError::new("Did you mean 'talk to [person]'?"))
        );
        assert_eq!(parse("talk to"), Err(CommandParseError::new("Talk to whom?")));
        assert_eq!(
            parse("talk to old man"),
            Ok(ParsedCommand::TalkTo {
                npc: "old man".to_string()
            })
        );
    }
}
