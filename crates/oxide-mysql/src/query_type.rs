//! Coarse statement classification.
//!
//! The classifier looks at the first few significant tokens only, so it
//! works for statements the grammar rejects or does not model at all.

use core::fmt;

use serde::{Serialize, Serializer};

use oxide_mysql_grammar::lexer::{Token, TokenStream, TokenType};

macro_rules! query_types {
    ($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
        /// The kind of statement a piece of SQL starts with.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum QueryType {
            $($(#[$meta])* $variant,)*
        }

        impl QueryType {
            /// Every tag, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Stable snake case name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

query_types! {
    /// The first tokens match no known statement.
    Unknown => "unknown",
    /// The input ended before the statement kind could be decided.
    Ambiguous => "ambiguous",

    AlterDatabase => "alter_database",
    AlterLogFileGroup => "alter_log_file_group",
    AlterFunction => "alter_function",
    AlterProcedure => "alter_procedure",
    AlterServer => "alter_server",
    AlterTable => "alter_table",
    AlterTableSpace => "alter_table_space",
    AlterEvent => "alter_event",
    AlterView => "alter_view",

    CreateTable => "create_table",
    CreateIndex => "create_index",
    CreateDatabase => "create_database",
    CreateEvent => "create_event",
    CreateView => "create_view",
    CreateRoutine => "create_routine",
    CreateProcedure => "create_procedure",
    CreateFunction => "create_function",
    CreateUdf => "create_udf",
    CreateTrigger => "create_trigger",
    CreateLogFileGroup => "create_log_file_group",
    CreateServer => "create_server",
    CreateTableSpace => "create_table_space",
    CreateRole => "create_role",

    DropDatabase => "drop_database",
    DropEvent => "drop_event",
    DropFunction => "drop_function",
    DropProcedure => "drop_procedure",
    DropIndex => "drop_index",
    DropLogfileGroup => "drop_logfile_group",
    DropServer => "drop_server",
    DropTable => "drop_table",
    DropTablespace => "drop_tablespace",
    DropTrigger => "drop_trigger",
    DropView => "drop_view",
    DropRole => "drop_role",

    RenameTable => "rename_table",
    TruncateTable => "truncate_table",

    Call => "call",
    Delete => "delete",
    Do => "do",
    Handler => "handler",
    Insert => "insert",
    LoadData => "load_data",
    LoadXml => "load_xml",
    Replace => "replace",
    Select => "select",
    Update => "update",
    /// A parenthesised partition clause.
    Partition => "partition",

    StartTransaction => "start_transaction",
    BeginWork => "begin_work",
    Commit => "commit",
    RollbackWork => "rollback_work",
    SetAutoCommit => "set_auto_commit",
    SetTransaction => "set_transaction",
    SavePoint => "save_point",
    ReleaseSavePoint => "release_save_point",
    RollbackSavePoint => "rollback_save_point",
    Lock => "lock",
    Unlock => "unlock",
    Xa => "xa",

    Purge => "purge",
    ChangeMaster => "change_master",
    Reset => "reset",
    ResetMaster => "reset_master",
    ResetSlave => "reset_slave",
    StartSlave => "start_slave",
    StopSlave => "stop_slave",
    LoadDataMaster => "load_data_master",
    LoadTableMaster => "load_table_master",

    Prepare => "prepare",
    Execute => "execute",
    Deallocate => "deallocate",

    AlterUser => "alter_user",
    CreateUser => "create_user",
    DropUser => "drop_user",
    GrantProxy => "grant_proxy",
    Grant => "grant",
    RenameUser => "rename_user",
    RevokeProxy => "revoke_proxy",
    Revoke => "revoke",

    AnalyzeTable => "analyze_table",
    CheckTable => "check_table",
    ChecksumTable => "checksum_table",
    OptimizeTable => "optimize_table",
    RepairTable => "repair_table",
    BackUpTable => "back_up_table",
    RestoreTable => "restore_table",

    InstallPlugin => "install_plugin",
    UninstallPlugin => "uninstall_plugin",

    /// Any variable assignment.
    Set => "set",
    SetPassword => "set_password",

    Show => "show",
    ShowAuthors => "show_authors",
    ShowBinLogEvents => "show_bin_log_events",
    ShowBinLogs => "show_bin_logs",
    ShowCharset => "show_charset",
    ShowCollation => "show_collation",
    ShowColumns => "show_columns",
    ShowContributors => "show_contributors",
    ShowCreateDatabase => "show_create_database",
    ShowCreateEvent => "show_create_event",
    ShowCreateFunction => "show_create_function",
    ShowCreateProcedure => "show_create_procedure",
    ShowCreateTable => "show_create_table",
    ShowCreateTrigger => "show_create_trigger",
    ShowCreateView => "show_create_view",
    ShowDatabases => "show_databases",
    ShowEngineStatus => "show_engine_status",
    ShowStorageEngines => "show_storage_engines",
    ShowErrors => "show_errors",
    ShowEvents => "show_events",
    ShowFunctionCode => "show_function_code",
    ShowFunctionStatus => "show_function_status",
    ShowGrants => "show_grants",
    ShowIndexes => "show_indexes",
    ShowInnoDbStatus => "show_inno_db_status",
    ShowMasterStatus => "show_master_status",
    ShowOpenTables => "show_open_tables",
    ShowPlugins => "show_plugins",
    ShowProcedureStatus => "show_procedure_status",
    ShowProcedureCode => "show_procedure_code",
    ShowPrivileges => "show_privileges",
    ShowProcessList => "show_process_list",
    ShowProfile => "show_profile",
    ShowProfiles => "show_profiles",
    ShowRelayLogEvents => "show_relay_log_events",
    ShowSlaveHosts => "show_slave_hosts",
    ShowSlaveStatus => "show_slave_status",
    ShowStatus => "show_status",
    ShowVariables => "show_variables",
    ShowTableStatus => "show_table_status",
    ShowTables => "show_tables",
    ShowTriggers => "show_triggers",
    ShowWarnings => "show_warnings",

    CacheIndex => "cache_index",
    Flush => "flush",
    Kill => "kill",
    LoadIndex => "load_index",

    ExplainTable => "explain_table",
    ExplainStatement => "explain_statement",

    Help => "help",
    Use => "use",
}

impl QueryType {
    /// Returns true for statements that change the schema.
    #[must_use]
    pub const fn is_ddl(self) -> bool {
        matches!(
            self,
            Self::AlterDatabase
                | Self::AlterLogFileGroup
                | Self::AlterFunction
                | Self::AlterProcedure
                | Self::AlterServer
                | Self::AlterTable
                | Self::AlterTableSpace
                | Self::AlterEvent
                | Self::AlterView
                | Self::CreateTable
                | Self::CreateIndex
                | Self::CreateDatabase
                | Self::CreateEvent
                | Self::CreateView
                | Self::CreateRoutine
                | Self::CreateProcedure
                | Self::CreateFunction
                | Self::CreateUdf
                | Self::CreateTrigger
                | Self::CreateLogFileGroup
                | Self::CreateServer
                | Self::CreateTableSpace
                | Self::CreateRole
                | Self::DropDatabase
                | Self::DropEvent
                | Self::DropFunction
                | Self::DropProcedure
                | Self::DropIndex
                | Self::DropLogfileGroup
                | Self::DropServer
                | Self::DropTable
                | Self::DropTablespace
                | Self::DropTrigger
                | Self::DropView
                | Self::DropRole
                | Self::RenameTable
                | Self::TruncateTable
        )
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QueryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Classifies the statement the tokens start with.
///
/// ```
/// use oxide_mysql::{MySqlParser, QueryType};
///
/// let result = MySqlParser::default().parse("SHOW FULL TABLES");
/// assert_eq!(result.query_type(), QueryType::ShowTables);
/// ```
#[must_use]
pub fn classify(tokens: &[Token]) -> QueryType {
    let mut cursor = Cursor::new(tokens);
    cursor.statement().unwrap_or_else(|tag| tag)
}

/// `Err` carries the tag to return when a decision point runs out of input
/// or hits something unexpected.
type Decision = Result<QueryType, QueryType>;

enum Step {
    End,
    /// An unquoted identifier or keyword, uppercased.
    Word {
        text: String,
        keyword: bool,
    },
    Symbol(TokenType),
}

struct Cursor<'a> {
    stream: TokenStream<'a>,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        let mut stream = TokenStream::new(tokens);
        stream.reset();
        Self { stream }
    }

    fn next(&mut self) -> Step {
        match self.stream.next_default_channel_token() {
            None => Step::End,
            Some(token) => match token.token_type {
                TokenType::Eof => Step::End,
                TokenType::Identifier => Step::Word {
                    text: token.text.to_ascii_uppercase(),
                    keyword: false,
                },
                TokenType::Keyword(_) => Step::Word {
                    text: token.text.to_ascii_uppercase(),
                    keyword: true,
                },
                other => Step::Symbol(other),
            },
        }
    }

    fn word(&mut self) -> Result<String, QueryType> {
        match self.next() {
            Step::End => Err(QueryType::Ambiguous),
            Step::Word { text, .. } => Ok(text),
            Step::Symbol(_) => Err(QueryType::Unknown),
        }
    }

    /// Like [`Cursor::word`], but the end of input is not an error.
    fn optional_word(&mut self) -> Option<String> {
        match self.next() {
            Step::Word { text, .. } => Some(text),
            Step::End | Step::Symbol(_) => None,
        }
    }

    fn statement(&mut self) -> Decision {
        let first = match self.next() {
            Step::End => return Err(QueryType::Ambiguous),
            Step::Symbol(TokenType::OpenPar) => return self.parenthesised(),
            Step::Symbol(_) => return Err(QueryType::Unknown),
            Step::Word { text, .. } => text,
        };
        match first.as_str() {
            "ALTER" => self.alter(),
            "CREATE" => self.create(),
            "DROP" => self.drop(),
            "TRUNCATE" => Ok(QueryType::TruncateTable),
            "CALL" => Ok(QueryType::Call),
            "DELETE" => Ok(QueryType::Delete),
            "DO" => Ok(QueryType::Do),
            "HANDLER" => Ok(QueryType::Handler),
            "INSERT" => Ok(QueryType::Insert),
            "REPLACE" => Ok(QueryType::Replace),
            "SELECT" | "TABLE" | "VALUES" => Ok(QueryType::Select),
            "UPDATE" => Ok(QueryType::Update),
            "WITH" => self.with(),
            "LOAD" => self.load(),
            "START" => match self.word()?.as_str() {
                "TRANSACTION" => Ok(QueryType::StartTransaction),
                "SLAVE" | "REPLICA" => Ok(QueryType::StartSlave),
                _ => Err(QueryType::Unknown),
            },
            "BEGIN" => match self.next() {
                Step::End | Step::Symbol(TokenType::Semicolon) => Ok(QueryType::BeginWork),
                Step::Word { text, .. } if text == "WORK" => Ok(QueryType::BeginWork),
                _ => Err(QueryType::Unknown),
            },
            "COMMIT" => Ok(QueryType::Commit),
            "ROLLBACK" => self.rollback(),
            "SET" => self.set(),
            "SAVEPOINT" => Ok(QueryType::SavePoint),
            "RELEASE" => Ok(QueryType::ReleaseSavePoint),
            "LOCK" => Ok(QueryType::Lock),
            "UNLOCK" => Ok(QueryType::Unlock),
            "XA" => Ok(QueryType::Xa),
            "PURGE" => Ok(QueryType::Purge),
            "CHANGE" => match self.word()?.as_str() {
                "MASTER" | "REPLICATION" => Ok(QueryType::ChangeMaster),
                _ => Err(QueryType::Unknown),
            },
            "RESET" => self.reset(),
            "STOP" => match self.word()?.as_str() {
                "SLAVE" | "REPLICA" => Ok(QueryType::StopSlave),
                _ => Err(QueryType::Unknown),
            },
            "PREPARE" => Ok(QueryType::Prepare),
            "EXECUTE" => Ok(QueryType::Execute),
            "DEALLOCATE" => Ok(QueryType::Deallocate),
            "GRANT" => self.grant_or_revoke(QueryType::Grant, QueryType::GrantProxy),
            "REVOKE" => self.grant_or_revoke(QueryType::Revoke, QueryType::RevokeProxy),
            "RENAME" => match self.word()?.as_str() {
                "TABLE" | "TABLES" => Ok(QueryType::RenameTable),
                "USER" => Ok(QueryType::RenameUser),
                _ => Err(QueryType::Unknown),
            },
            "ANALYZE" => Ok(QueryType::AnalyzeTable),
            "CHECK" => Ok(QueryType::CheckTable),
            "CHECKSUM" => Ok(QueryType::ChecksumTable),
            "OPTIMIZE" => Ok(QueryType::OptimizeTable),
            "REPAIR" => Ok(QueryType::RepairTable),
            "BACKUP" => Ok(QueryType::BackUpTable),
            "RESTORE" => Ok(QueryType::RestoreTable),
            "INSTALL" => Ok(QueryType::InstallPlugin),
            "UNINSTALL" => Ok(QueryType::UninstallPlugin),
            "SHOW" => self.show(),
            "CACHE" => Ok(QueryType::CacheIndex),
            "FLUSH" => Ok(QueryType::Flush),
            "KILL" => Ok(QueryType::Kill),
            "DESCRIBE" | "DESC" | "EXPLAIN" => self.explain(),
            "HELP" => Ok(QueryType::Help),
            "USE" => Ok(QueryType::Use),
            _ => Err(QueryType::Unknown),
        }
    }

    /// `(((SELECT ...)))` or a partition clause.
    fn parenthesised(&mut self) -> Decision {
        loop {
            match self.next() {
                Step::End => return Err(QueryType::Ambiguous),
                Step::Symbol(TokenType::OpenPar) => {}
                Step::Word { text, .. } if text == "SELECT" || text == "WITH" => {
                    return Ok(QueryType::Select);
                }
                _ => return Ok(QueryType::Partition),
            }
        }
    }

    fn alter(&mut self) -> Decision {
        let mut word = self.word()?;
        if word == "DEFINER" {
            word = self.skip_definer()?;
        }
        match word.as_str() {
            "DATABASE" | "SCHEMA" => Ok(QueryType::AlterDatabase),
            "LOGFILE" => Ok(QueryType::AlterLogFileGroup),
            "FUNCTION" => Ok(QueryType::AlterFunction),
            "PROCEDURE" => Ok(QueryType::AlterProcedure),
            "SERVER" => Ok(QueryType::AlterServer),
            "TABLE" | "ONLINE" | "OFFLINE" | "IGNORE" => Ok(QueryType::AlterTable),
            "TABLESPACE" => Ok(QueryType::AlterTableSpace),
            "EVENT" => Ok(QueryType::AlterEvent),
            "VIEW" | "ALGORITHM" | "SQL" => Ok(QueryType::AlterView),
            "USER" => Ok(QueryType::AlterUser),
            _ => Err(QueryType::Unknown),
        }
    }

    fn create(&mut self) -> Decision {
        let mut word = self.word()?;
        if word == "DEFINER" {
            word = self.skip_definer()?;
        }
        match word.as_str() {
            "TEMPORARY" | "TABLE" => Ok(QueryType::CreateTable),
            "ONLINE" | "OFFLINE" | "INDEX" | "UNIQUE" | "FULLTEXT" | "SPATIAL" => {
                Ok(QueryType::CreateIndex)
            }
            "DATABASE" | "SCHEMA" => Ok(QueryType::CreateDatabase),
            "EVENT" => Ok(QueryType::CreateEvent),
            "VIEW" | "OR" | "ALGORITHM" | "SQL" => Ok(QueryType::CreateView),
            "PROCEDURE" => Ok(QueryType::CreateProcedure),
            "FUNCTION" => {
                // A loadable function is declared with `RETURNS` right after its name.
                if matches!(self.next(), Step::End) {
                    return Err(QueryType::Ambiguous);
                }
                match self.optional_word().as_deref() {
                    Some("RETURNS") => Ok(QueryType::CreateUdf),
                    _ => Ok(QueryType::CreateFunction),
                }
            }
            "AGGREGATE" => Ok(QueryType::CreateUdf),
            "TRIGGER" => Ok(QueryType::CreateTrigger),
            "LOGFILE" => Ok(QueryType::CreateLogFileGroup),
            "SERVER" => Ok(QueryType::CreateServer),
            "TABLESPACE" | "UNDO" => Ok(QueryType::CreateTableSpace),
            "USER" => Ok(QueryType::CreateUser),
            "ROLE" => Ok(QueryType::CreateRole),
            _ => Err(QueryType::Unknown),
        }
    }

    /// Skips `= user[@host]` and returns the word after it.
    fn skip_definer(&mut self) -> Result<String, QueryType> {
        loop {
            match self.next() {
                Step::End => return Err(QueryType::Ambiguous),
                Step::Word { text, .. }
                    if matches!(
                        text.as_str(),
                        "EVENT" | "VIEW" | "PROCEDURE" | "FUNCTION" | "TRIGGER" | "SQL"
                    ) =>
                {
                    return Ok(text);
                }
                _ => {}
            }
        }
    }

    fn drop(&mut self) -> Decision {
        match self.word()?.as_str() {
            "DATABASE" | "SCHEMA" => Ok(QueryType::DropDatabase),
            "EVENT" => Ok(QueryType::DropEvent),
            "PROCEDURE" => Ok(QueryType::DropProcedure),
            "FUNCTION" => Ok(QueryType::DropFunction),
            "ONLINE" | "OFFLINE" | "INDEX" => Ok(QueryType::DropIndex),
            "LOGFILE" => Ok(QueryType::DropLogfileGroup),
            "SERVER" => Ok(QueryType::DropServer),
            "TEMPORARY" | "TABLE" | "TABLES" => Ok(QueryType::DropTable),
            "TABLESPACE" | "UNDO" => Ok(QueryType::DropTablespace),
            "TRIGGER" => Ok(QueryType::DropTrigger),
            "VIEW" => Ok(QueryType::DropView),
            "PREPARE" => Ok(QueryType::Deallocate),
            "USER" => Ok(QueryType::DropUser),
            "ROLE" => Ok(QueryType::DropRole),
            _ => Err(QueryType::Unknown),
        }
    }

    /// The statement kind after a `WITH` clause.
    fn with(&mut self) -> Decision {
        let mut depth = 0usize;
        loop {
            match self.next() {
                Step::End => return Err(QueryType::Ambiguous),
                Step::Symbol(TokenType::OpenPar) => depth += 1,
                Step::Symbol(TokenType::ClosePar) => depth = depth.saturating_sub(1),
                Step::Word { text, .. } if depth == 0 => match text.as_str() {
                    "SELECT" => return Ok(QueryType::Select),
                    "UPDATE" => return Ok(QueryType::Update),
                    "DELETE" => return Ok(QueryType::Delete),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn load(&mut self) -> Decision {
        match self.word()?.as_str() {
            "DATA" => {
                // LOAD DATA FROM MASTER
                if self.optional_word().as_deref() == Some("FROM") {
                    Ok(QueryType::LoadDataMaster)
                } else {
                    Ok(QueryType::LoadData)
                }
            }
            "XML" => Ok(QueryType::LoadXml),
            "TABLE" => Ok(QueryType::LoadTableMaster),
            "INDEX" => Ok(QueryType::LoadIndex),
            _ => Err(QueryType::Unknown),
        }
    }

    fn rollback(&mut self) -> Decision {
        let mut next = self.optional_word();
        if next.as_deref() == Some("WORK") {
            next = self.optional_word();
        }
        match next.as_deref() {
            Some("TO") => Ok(QueryType::RollbackSavePoint),
            _ => Ok(QueryType::RollbackWork),
        }
    }

    fn set(&mut self) -> Decision {
        let first = match self.next() {
            Step::End => return Err(QueryType::Ambiguous),
            Step::Symbol(TokenType::AtAt) => return self.set_system_variable(),
            Step::Symbol(_) => return Ok(QueryType::Set),
            Step::Word { text, .. } => text,
        };
        match first.as_str() {
            "PASSWORD" => Ok(QueryType::SetPassword),
            "TRANSACTION" => Ok(QueryType::SetTransaction),
            "AUTOCOMMIT" => Ok(QueryType::SetAutoCommit),
            "GLOBAL" | "SESSION" | "LOCAL" | "PERSIST" | "PERSIST_ONLY" => {
                match self.word()?.as_str() {
                    "TRANSACTION" => Ok(QueryType::SetTransaction),
                    "AUTOCOMMIT" => Ok(QueryType::SetAutoCommit),
                    _ => Ok(QueryType::Set),
                }
            }
            _ => Ok(QueryType::Set),
        }
    }

    /// `SET @@[scope.]name ...`
    fn set_system_variable(&mut self) -> Decision {
        let mut name = self.word()?;
        if matches!(
            name.as_str(),
            "GLOBAL" | "SESSION" | "LOCAL" | "PERSIST" | "PERSIST_ONLY"
        ) {
            if let Step::Symbol(TokenType::Dot) = self.next() {
                name = self.word()?;
            }
        }
        if name == "AUTOCOMMIT" {
            Ok(QueryType::SetAutoCommit)
        } else {
            Ok(QueryType::Set)
        }
    }

    fn reset(&mut self) -> Decision {
        match self.word()?.as_str() {
            "MASTER" => Ok(QueryType::ResetMaster),
            "SLAVE" | "REPLICA" => Ok(QueryType::ResetSlave),
            _ => Ok(QueryType::Reset),
        }
    }

    fn grant_or_revoke(&mut self, plain: QueryType, proxy: QueryType) -> Decision {
        match self.word()?.as_str() {
            "PROXY" => Ok(proxy),
            _ => Ok(plain),
        }
    }

    fn show(&mut self) -> Decision {
        let mut word = self.word()?;
        if word == "FULL" {
            word = self.word()?;
        }
        match word.as_str() {
            "AUTHORS" => Ok(QueryType::ShowAuthors),
            "BINARY" | "MASTER" => match self.word()?.as_str() {
                "LOGS" => Ok(QueryType::ShowBinLogs),
                "STATUS" => Ok(QueryType::ShowMasterStatus),
                _ => Err(QueryType::Unknown),
            },
            "BINLOG" => Ok(QueryType::ShowBinLogEvents),
            "RELAYLOG" => Ok(QueryType::ShowRelayLogEvents),
            "CHAR" | "CHARACTER" | "CHARSET" => Ok(QueryType::ShowCharset),
            "COLLATION" => Ok(QueryType::ShowCollation),
            "COLUMNS" | "FIELDS" => Ok(QueryType::ShowColumns),
            "CONTRIBUTORS" => Ok(QueryType::ShowContributors),
            "COUNT" => self.show_count(),
            "CREATE" => match self.word()?.as_str() {
                "DATABASE" | "SCHEMA" => Ok(QueryType::ShowCreateDatabase),
                "EVENT" => Ok(QueryType::ShowCreateEvent),
                "FUNCTION" => Ok(QueryType::ShowCreateFunction),
                "PROCEDURE" => Ok(QueryType::ShowCreateProcedure),
                "TABLE" => Ok(QueryType::ShowCreateTable),
                "TRIGGER" => Ok(QueryType::ShowCreateTrigger),
                "VIEW" => Ok(QueryType::ShowCreateView),
                _ => Err(QueryType::Unknown),
            },
            "DATABASES" | "SCHEMAS" => Ok(QueryType::ShowDatabases),
            "ENGINE" => Ok(QueryType::ShowEngineStatus),
            "STORAGE" | "ENGINES" => Ok(QueryType::ShowStorageEngines),
            "ERRORS" => Ok(QueryType::ShowErrors),
            "EVENTS" => Ok(QueryType::ShowEvents),
            "FUNCTION" => match self.word()?.as_str() {
                "CODE" => Ok(QueryType::ShowFunctionCode),
                _ => Ok(QueryType::ShowFunctionStatus),
            },
            "PROCEDURE" => match self.word()?.as_str() {
                "CODE" => Ok(QueryType::ShowProcedureCode),
                _ => Ok(QueryType::ShowProcedureStatus),
            },
            "GRANTS" => Ok(QueryType::ShowGrants),
            "INDEX" | "INDEXES" | "KEYS" => Ok(QueryType::ShowIndexes),
            "INNODB" => Ok(QueryType::ShowInnoDbStatus),
            "OPEN" => Ok(QueryType::ShowOpenTables),
            "PLUGIN" | "PLUGINS" => Ok(QueryType::ShowPlugins),
            "PRIVILEGES" => Ok(QueryType::ShowPrivileges),
            "PROCESSLIST" => Ok(QueryType::ShowProcessList),
            "PROFILE" => Ok(QueryType::ShowProfile),
            "PROFILES" => Ok(QueryType::ShowProfiles),
            "SLAVE" | "REPLICA" => match self.word()?.as_str() {
                "HOSTS" => Ok(QueryType::ShowSlaveHosts),
                "STATUS" => Ok(QueryType::ShowSlaveStatus),
                _ => Err(QueryType::Unknown),
            },
            "REPLICAS" => Ok(QueryType::ShowSlaveHosts),
            "GLOBAL" | "SESSION" | "LOCAL" => match self.word()?.as_str() {
                "STATUS" => Ok(QueryType::ShowStatus),
                "VARIABLES" => Ok(QueryType::ShowVariables),
                _ => Err(QueryType::Unknown),
            },
            "STATUS" => Ok(QueryType::ShowStatus),
            "VARIABLES" => Ok(QueryType::ShowVariables),
            "TABLE" => match self.word()?.as_str() {
                "STATUS" => Ok(QueryType::ShowTableStatus),
                _ => Err(QueryType::Unknown),
            },
            "TABLES" => Ok(QueryType::ShowTables),
            "TRIGGERS" => Ok(QueryType::ShowTriggers),
            "WARNINGS" => Ok(QueryType::ShowWarnings),
            _ => Ok(QueryType::Show),
        }
    }

    /// `SHOW COUNT(*) ERRORS` or `SHOW COUNT(*) WARNINGS`.
    fn show_count(&mut self) -> Decision {
        for expected in [TokenType::OpenPar, TokenType::Mult, TokenType::ClosePar] {
            match self.next() {
                Step::End => return Err(QueryType::Ambiguous),
                Step::Symbol(found) if found == expected => {}
                _ => return Err(QueryType::Unknown),
            }
        }
        match self.word()?.as_str() {
            "ERRORS" => Ok(QueryType::ShowErrors),
            "WARNINGS" => Ok(QueryType::ShowWarnings),
            _ => Err(QueryType::Unknown),
        }
    }

    /// `DESCRIBE table` versus `EXPLAIN statement`.
    fn explain(&mut self) -> Decision {
        match self.next() {
            Step::End => Err(QueryType::Ambiguous),
            Step::Symbol(TokenType::OpenPar) => Ok(QueryType::ExplainStatement),
            Step::Symbol(
                TokenType::BackTickQuotedId | TokenType::DoubleQuotedText,
            ) => Ok(QueryType::ExplainTable),
            Step::Symbol(_) => Err(QueryType::Unknown),
            Step::Word { keyword: false, .. } => Ok(QueryType::ExplainTable),
            Step::Word { text, keyword: true } => match text.as_str() {
                "EXTENDED" | "PARTITIONS" => match self.next() {
                    Step::End => Err(QueryType::Ambiguous),
                    Step::Symbol(TokenType::OpenPar) => Ok(QueryType::ExplainStatement),
                    Step::Word { text, .. } if is_explainable(&text) => {
                        Ok(QueryType::ExplainStatement)
                    }
                    _ => Ok(QueryType::ExplainTable),
                },
                "FORMAT" | "ANALYZE" | "FOR" => Ok(QueryType::ExplainStatement),
                word if is_explainable(word) => Ok(QueryType::ExplainStatement),
                _ => Ok(QueryType::ExplainTable),
            },
        }
    }
}

fn is_explainable(word: &str) -> bool {
    matches!(
        word,
        "SELECT" | "WITH" | "TABLE" | "INSERT" | "REPLACE" | "UPDATE" | "DELETE"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_mysql_grammar::lexer::{Lexer, LexerOptions};

    fn query_type(sql: &str) -> QueryType {
        let options = LexerOptions::default();
        let tokens = Lexer::new(sql, &options).tokenize(&mut ());
        classify(&tokens)
    }

    #[test]
    fn test_dml() {
        assert_eq!(query_type("SELECT 1"), QueryType::Select);
        assert_eq!(query_type("  /* c */ select * from t"), QueryType::Select);
        assert_eq!(query_type("INSERT INTO t VALUES (1)"), QueryType::Insert);
        assert_eq!(query_type("UPDATE t SET a = 1"), QueryType::Update);
        assert_eq!(query_type("DELETE FROM t"), QueryType::Delete);
        assert_eq!(query_type("REPLACE t VALUES (1)"), QueryType::Replace);
        assert_eq!(query_type("WITH c AS (SELECT 1) SELECT * FROM c"), QueryType::Select);
        assert_eq!(query_type("WITH c AS (SELECT 1) DELETE FROM t"), QueryType::Delete);
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(query_type("((SELECT 1))"), QueryType::Select);
        assert_eq!(query_type("(PARTITION p1)"), QueryType::Partition);
        assert_eq!(query_type("(("), QueryType::Ambiguous);
    }

    #[test]
    fn test_create_forms() {
        assert_eq!(query_type("CREATE TABLE t (a INT)"), QueryType::CreateTable);
        assert_eq!(query_type("CREATE TEMPORARY TABLE t (a INT)"), QueryType::CreateTable);
        assert_eq!(query_type("CREATE UNIQUE INDEX i ON t (a)"), QueryType::CreateIndex);
        assert_eq!(query_type("CREATE OR REPLACE VIEW v AS SELECT 1"), QueryType::CreateView);
        assert_eq!(
            query_type("CREATE DEFINER = admin@localhost PROCEDURE p() BEGIN END"),
            QueryType::CreateProcedure
        );
        assert_eq!(query_type("CREATE FUNCTION f RETURNS STRING SONAME 'x.so'"), QueryType::CreateUdf);
        assert_eq!(query_type("CREATE FUNCTION f() RETURNS INT RETURN 1"), QueryType::CreateFunction);
        assert_eq!(query_type("CREATE FUNCTION `f`() RETURNS INT RETURN 1"), QueryType::CreateFunction);
        assert_eq!(query_type("CREATE FUNCTION `f` RETURNS REAL SONAME 'x.so'"), QueryType::CreateUdf);
        assert_eq!(query_type("CREATE FUNCTION"), QueryType::Ambiguous);
        assert_eq!(query_type("CREATE ROLE app"), QueryType::CreateRole);
        assert_eq!(query_type("CREATE"), QueryType::Ambiguous);
        assert_eq!(query_type("CREATE NONSENSE"), QueryType::Unknown);
    }

    #[test]
    fn test_alter_and_drop() {
        assert_eq!(query_type("ALTER TABLE t ADD c INT"), QueryType::AlterTable);
        assert_eq!(query_type("ALTER ALGORITHM = MERGE VIEW v AS SELECT 1"), QueryType::AlterView);
        assert_eq!(query_type("ALTER USER u"), QueryType::AlterUser);
        assert_eq!(query_type("DROP TABLE IF EXISTS t"), QueryType::DropTable);
        assert_eq!(query_type("DROP PREPARE stmt"), QueryType::Deallocate);
        assert_eq!(query_type("DROP"), QueryType::Ambiguous);
        assert_eq!(query_type("RENAME TABLE a TO b"), QueryType::RenameTable);
        assert_eq!(query_type("TRUNCATE t"), QueryType::TruncateTable);
    }

    #[test]
    fn test_transactions() {
        assert_eq!(query_type("START TRANSACTION"), QueryType::StartTransaction);
        assert_eq!(query_type("BEGIN"), QueryType::BeginWork);
        assert_eq!(query_type("BEGIN WORK"), QueryType::BeginWork);
        assert_eq!(query_type("ROLLBACK"), QueryType::RollbackWork);
        assert_eq!(query_type("ROLLBACK WORK TO SAVEPOINT s"), QueryType::RollbackSavePoint);
        assert_eq!(query_type("ROLLBACK TO s"), QueryType::RollbackSavePoint);
        assert_eq!(query_type("RELEASE SAVEPOINT s"), QueryType::ReleaseSavePoint);
    }

    #[test]
    fn test_set_forms() {
        assert_eq!(query_type("SET autocommit = 0"), QueryType::SetAutoCommit);
        assert_eq!(query_type("SET @@session.autocommit = 0"), QueryType::SetAutoCommit);
        assert_eq!(query_type("SET SESSION TRANSACTION READ ONLY"), QueryType::SetTransaction);
        assert_eq!(query_type("SET PASSWORD = 'x'"), QueryType::SetPassword);
        assert_eq!(query_type("SET @a = 1"), QueryType::Set);
        assert_eq!(query_type("SET NAMES utf8"), QueryType::Set);
        assert_eq!(query_type("SET"), QueryType::Ambiguous);
    }

    #[test]
    fn test_load_reset_grant() {
        assert_eq!(query_type("LOAD DATA INFILE 'f' INTO TABLE t"), QueryType::LoadData);
        assert_eq!(query_type("LOAD DATA FROM MASTER"), QueryType::LoadDataMaster);
        assert_eq!(query_type("LOAD XML INFILE 'f' INTO TABLE t"), QueryType::LoadXml);
        assert_eq!(query_type("RESET MASTER"), QueryType::ResetMaster);
        assert_eq!(query_type("RESET QUERY CACHE"), QueryType::Reset);
        assert_eq!(query_type("GRANT PROXY ON a TO b"), QueryType::GrantProxy);
        assert_eq!(query_type("GRANT SELECT ON t TO u"), QueryType::Grant);
        assert_eq!(query_type("REVOKE ALL ON t FROM u"), QueryType::Revoke);
    }

    #[test]
    fn test_show_forms() {
        assert_eq!(query_type("SHOW FULL TABLES"), QueryType::ShowTables);
        assert_eq!(query_type("SHOW FULL COLUMNS FROM t"), QueryType::ShowColumns);
        assert_eq!(query_type("SHOW CREATE TABLE t"), QueryType::ShowCreateTable);
        assert_eq!(query_type("SHOW GLOBAL VARIABLES"), QueryType::ShowVariables);
        assert_eq!(query_type("SHOW COUNT(*) WARNINGS"), QueryType::ShowWarnings);
        assert_eq!(query_type("SHOW MASTER STATUS"), QueryType::ShowMasterStatus);
        assert_eq!(query_type("SHOW FUNCTION CODE f"), QueryType::ShowFunctionCode);
        assert_eq!(query_type("SHOW SOMETHING"), QueryType::Show);
        assert_eq!(query_type("SHOW"), QueryType::Ambiguous);
    }

    #[test]
    fn test_describe_and_explain() {
        assert_eq!(query_type("DESCRIBE users"), QueryType::ExplainTable);
        assert_eq!(query_type("DESC `users`"), QueryType::ExplainTable);
        assert_eq!(query_type("EXPLAIN SELECT 1"), QueryType::ExplainStatement);
        assert_eq!(query_type("EXPLAIN EXTENDED SELECT 1"), QueryType::ExplainStatement);
        assert_eq!(query_type("EXPLAIN FORMAT = JSON DELETE FROM t"), QueryType::ExplainStatement);
        assert_eq!(query_type("EXPLAIN"), QueryType::Ambiguous);
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(query_type(""), QueryType::Ambiguous);
        assert_eq!(query_type("-- only a comment"), QueryType::Ambiguous);
        assert_eq!(query_type("SELCT 1"), QueryType::Unknown);
        assert_eq!(query_type("42"), QueryType::Unknown);
    }

    #[test]
    fn test_ddl_membership() {
        assert!(QueryType::CreateTable.is_ddl());
        assert!(QueryType::TruncateTable.is_ddl());
        assert!(QueryType::RenameTable.is_ddl());
        assert!(!QueryType::RenameUser.is_ddl());
        assert!(!QueryType::Select.is_ddl());
        assert!(!QueryType::CreateUser.is_ddl());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = QueryType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
        assert!(before > 120);
        assert_eq!(serde_json::to_string(&QueryType::ShowTables).unwrap(), "\"show_tables\"");
    }
}
