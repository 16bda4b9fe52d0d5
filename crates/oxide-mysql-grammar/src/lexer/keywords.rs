//! MySQL keyword vocabulary.
//!
//! Each keyword carries its status in the three supported server families
//! (5.6, 5.7, 8.0): absent (`X`, lexes as a plain identifier), non-reserved
//! (`K`, usable as an unquoted identifier) or reserved (`R`).

use serde::{Serialize, Serializer};

use crate::version::VersionFamily;

/// Status of a keyword within one server family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordStatus {
    /// Not a keyword in this family.
    Absent,
    /// A keyword that may still be used as an unquoted identifier.
    NonReserved,
    /// A keyword that requires quoting to be used as an identifier.
    Reserved,
}

macro_rules! status {
    (X) => {
        KeywordStatus::Absent
    };
    (K) => {
        KeywordStatus::NonReserved
    };
    (R) => {
        KeywordStatus::Reserved
    };
}

macro_rules! keywords {
    ($($variant:ident => $text:literal [$v56:ident $v57:ident $v80:ident],)*) => {
        /// SQL keywords known to the tokenizer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a word (case-insensitive).
            ///
            /// The lookup ignores version availability; use
            /// [`Keyword::status`] to check it.
            #[must_use]
            pub fn from_word(word: &str) -> Option<Self> {
                match word.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as written in SQL.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            const fn statuses(self) -> [KeywordStatus; 3] {
                match self {
                    $(Self::$variant => [status!($v56), status!($v57), status!($v80)],)*
                }
            }
        }
    };
}

keywords! {
    Accessible => "ACCESSIBLE" [R R R],
    Account => "ACCOUNT" [X K K],
    Action => "ACTION" [K K K],
    Add => "ADD" [R R R],
    Admin => "ADMIN" [X X K],
    After => "AFTER" [K K K],
    Against => "AGAINST" [K K K],
    Aggregate => "AGGREGATE" [K K K],
    Algorithm => "ALGORITHM" [K K K],
    All => "ALL" [R R R],
    Alter => "ALTER" [R R R],
    Always => "ALWAYS" [X K K],
    Analyse => "ANALYSE" [K K X],
    Analyze => "ANALYZE" [R R R],
    And => "AND" [R R R],
    Any => "ANY" [K K K],
    As => "AS" [R R R],
    Asc => "ASC" [R R R],
    Ascii => "ASCII" [K K K],
    Asensitive => "ASENSITIVE" [R R R],
    At => "AT" [K K K],
    Authors => "AUTHORS" [K X X],
    AutoIncrement => "AUTO_INCREMENT" [K K K],
    Autoextend => "AUTOEXTEND_SIZE" [K K K],
    Avg => "AVG" [K K K],
    AvgRowLength => "AVG_ROW_LENGTH" [K K K],
    Before => "BEFORE" [R R R],
    Begin => "BEGIN" [K K K],
    Between => "BETWEEN" [R R R],
    Bigint => "BIGINT" [R R R],
    Binary => "BINARY" [R R R],
    Binlog => "BINLOG" [K K K],
    Bit => "BIT" [K K K],
    Blob => "BLOB" [R R R],
    Block => "BLOCK" [K K K],
    Bool => "BOOL" [K K K],
    Boolean => "BOOLEAN" [K K K],
    Both => "BOTH" [R R R],
    Btree => "BTREE" [K K K],
    By => "BY" [R R R],
    Cache => "CACHE" [K K K],
    Call => "CALL" [R R R],
    Cascade => "CASCADE" [R R R],
    Cascaded => "CASCADED" [K K K],
    Case => "CASE" [R R R],
    Chain => "CHAIN" [K K K],
    Change => "CHANGE" [R R R],
    Changed => "CHANGED" [K K K],
    Char => "CHAR" [R R R],
    Character => "CHARACTER" [R R R],
    Charset => "CHARSET" [K K K],
    Check => "CHECK" [R R R],
    Checksum => "CHECKSUM" [K K K],
    Close => "CLOSE" [K K K],
    Code => "CODE" [K K K],
    Collate => "COLLATE" [R R R],
    Collation => "COLLATION" [K K K],
    Column => "COLUMN" [R R R],
    Columns => "COLUMNS" [K K K],
    Comment => "COMMENT" [K K K],
    Commit => "COMMIT" [K K K],
    Committed => "COMMITTED" [K K K],
    Compact => "COMPACT" [K K K],
    Compressed => "COMPRESSED" [K K K],
    Condition => "CONDITION" [R R R],
    Connection => "CONNECTION" [K K K],
    Consistent => "CONSISTENT" [K K K],
    Constraint => "CONSTRAINT" [R R R],
    Contains => "CONTAINS" [K K K],
    Continue => "CONTINUE" [R R R],
    Contributors => "CONTRIBUTORS" [K X X],
    Convert => "CONVERT" [R R R],
    Create => "CREATE" [R R R],
    Cross => "CROSS" [R R R],
    Cube => "CUBE" [X X R],
    CumeDist => "CUME_DIST" [X X R],
    Current => "CURRENT" [K K K],
    CurrentDate => "CURRENT_DATE" [R R R],
    CurrentTime => "CURRENT_TIME" [R R R],
    CurrentTimestamp => "CURRENT_TIMESTAMP" [R R R],
    CurrentUser => "CURRENT_USER" [R R R],
    Cursor => "CURSOR" [R R R],
    Data => "DATA" [K K K],
    Database => "DATABASE" [R R R],
    Databases => "DATABASES" [R R R],
    Date => "DATE" [K K K],
    Datetime => "DATETIME" [K K K],
    Day => "DAY" [K K K],
    DayHour => "DAY_HOUR" [R R R],
    DayMicrosecond => "DAY_MICROSECOND" [R R R],
    DayMinute => "DAY_MINUTE" [R R R],
    DaySecond => "DAY_SECOND" [R R R],
    Deallocate => "DEALLOCATE" [K K K],
    Dec => "DEC" [R R R],
    Decimal => "DECIMAL" [R R R],
    Declare => "DECLARE" [R R R],
    Default => "DEFAULT" [R R R],
    Definer => "DEFINER" [K K K],
    Delayed => "DELAYED" [R R R],
    Delete => "DELETE" [R R R],
    DenseRank => "DENSE_RANK" [X X R],
    Desc => "DESC" [R R R],
    Describe => "DESCRIBE" [R R R],
    Deterministic => "DETERMINISTIC" [R R R],
    Disable => "DISABLE" [K K K],
    Discard => "DISCARD" [K K K],
    Distinct => "DISTINCT" [R R R],
    Distinctrow => "DISTINCTROW" [R R R],
    Div => "DIV" [R R R],
    Do => "DO" [K K K],
    Double => "DOUBLE" [R R R],
    Drop => "DROP" [R R R],
    Dual => "DUAL" [R R R],
    Dumpfile => "DUMPFILE" [K K K],
    Duplicate => "DUPLICATE" [K K K],
    Dynamic => "DYNAMIC" [K K K],
    Each => "EACH" [R R R],
    Else => "ELSE" [R R R],
    Elseif => "ELSEIF" [R R R],
    Empty => "EMPTY" [X X R],
    Enable => "ENABLE" [K K K],
    Enclosed => "ENCLOSED" [R R R],
    End => "END" [K K K],
    Engine => "ENGINE" [K K K],
    Engines => "ENGINES" [K K K],
    Enum => "ENUM" [K K K],
    Errors => "ERRORS" [K K K],
    Escape => "ESCAPE" [K K K],
    Escaped => "ESCAPED" [R R R],
    Event => "EVENT" [K K K],
    Events => "EVENTS" [K K K],
    Every => "EVERY" [K K K],
    Except => "EXCEPT" [X X R],
    Exchange => "EXCHANGE" [K K K],
    Execute => "EXECUTE" [K K K],
    Exists => "EXISTS" [R R R],
    Exit => "EXIT" [R R R],
    Expansion => "EXPANSION" [K K K],
    Explain => "EXPLAIN" [R R R],
    Extended => "EXTENDED" [K K K],
    False => "FALSE" [R R R],
    Fetch => "FETCH" [R R R],
    Fields => "FIELDS" [K K K],
    File => "FILE" [K K K],
    First => "FIRST" [K K K],
    FirstValue => "FIRST_VALUE" [X X R],
    Fixed => "FIXED" [K K K],
    Float => "FLOAT" [R R R],
    Float4 => "FLOAT4" [R R R],
    Float8 => "FLOAT8" [R R R],
    Flush => "FLUSH" [K K K],
    Following => "FOLLOWING" [X X K],
    For => "FOR" [R R R],
    Force => "FORCE" [R R R],
    Foreign => "FOREIGN" [R R R],
    Format => "FORMAT" [K K K],
    From => "FROM" [R R R],
    Full => "FULL" [K K K],
    Fulltext => "FULLTEXT" [R R R],
    Function => "FUNCTION" [K K R],
    Generated => "GENERATED" [X R R],
    Get => "GET" [R R R],
    Global => "GLOBAL" [K K K],
    Grant => "GRANT" [R R R],
    Grants => "GRANTS" [K K K],
    Group => "GROUP" [R R R],
    Grouping => "GROUPING" [X X R],
    Groups => "GROUPS" [X X R],
    Handler => "HANDLER" [K K K],
    Hash => "HASH" [K K K],
    Having => "HAVING" [R R R],
    Help => "HELP" [K K K],
    HighPriority => "HIGH_PRIORITY" [R R R],
    Host => "HOST" [K K K],
    Hosts => "HOSTS" [K K K],
    Hour => "HOUR" [K K K],
    HourMicrosecond => "HOUR_MICROSECOND" [R R R],
    HourMinute => "HOUR_MINUTE" [R R R],
    HourSecond => "HOUR_SECOND" [R R R],
    Identified => "IDENTIFIED" [K K K],
    If => "IF" [R R R],
    Ignore => "IGNORE" [R R R],
    Import => "IMPORT" [K K K],
    In => "IN" [R R R],
    Index => "INDEX" [R R R],
    Indexes => "INDEXES" [K K K],
    Infile => "INFILE" [R R R],
    Inner => "INNER" [R R R],
    Inout => "INOUT" [R R R],
    Insensitive => "INSENSITIVE" [R R R],
    Insert => "INSERT" [R R R],
    Install => "INSTALL" [K K K],
    Int => "INT" [R R R],
    Int1 => "INT1" [R R R],
    Int2 => "INT2" [R R R],
    Int3 => "INT3" [R R R],
    Int4 => "INT4" [R R R],
    Int8 => "INT8" [R R R],
    Integer => "INTEGER" [R R R],
    Intersect => "INTERSECT" [X X R],
    Interval => "INTERVAL" [R R R],
    Into => "INTO" [R R R],
    Invisible => "INVISIBLE" [X X K],
    Invoker => "INVOKER" [K K K],
    IoAfterGtids => "IO_AFTER_GTIDS" [R R R],
    IoBeforeGtids => "IO_BEFORE_GTIDS" [R R R],
    Is => "IS" [R R R],
    Isolation => "ISOLATION" [K K K],
    Iterate => "ITERATE" [R R R],
    Join => "JOIN" [R R R],
    Json => "JSON" [X K K],
    JsonTable => "JSON_TABLE" [X X R],
    Key => "KEY" [R R R],
    KeyBlockSize => "KEY_BLOCK_SIZE" [K K K],
    Keys => "KEYS" [R R R],
    Kill => "KILL" [R R R],
    Lag => "LAG" [X X R],
    Language => "LANGUAGE" [K K K],
    Last => "LAST" [K K K],
    LastValue => "LAST_VALUE" [X X R],
    Lateral => "LATERAL" [X X R],
    Lead => "LEAD" [X X R],
    Leading => "LEADING" [R R R],
    Leave => "LEAVE" [R R R],
    Left => "LEFT" [R R R],
    Less => "LESS" [K K K],
    Level => "LEVEL" [K K K],
    Like => "LIKE" [R R R],
    Limit => "LIMIT" [R R R],
    Linear => "LINEAR" [R R R],
    Lines => "LINES" [R R R],
    List => "LIST" [K K K],
    Load => "LOAD" [R R R],
    Local => "LOCAL" [K K K],
    Localtime => "LOCALTIME" [R R R],
    Localtimestamp => "LOCALTIMESTAMP" [R R R],
    Lock => "LOCK" [R R R],
    Locked => "LOCKED" [X X K],
    Logfile => "LOGFILE" [K K K],
    Logs => "LOGS" [K K K],
    Long => "LONG" [R R R],
    Longblob => "LONGBLOB" [R R R],
    Longtext => "LONGTEXT" [R R R],
    Loop => "LOOP" [R R R],
    LowPriority => "LOW_PRIORITY" [R R R],
    Master => "MASTER" [K K K],
    MasterBind => "MASTER_BIND" [R R R],
    MasterSslVerifyServerCert => "MASTER_SSL_VERIFY_SERVER_CERT" [R R R],
    Match => "MATCH" [R R R],
    MaxRows => "MAX_ROWS" [K K K],
    Maxvalue => "MAXVALUE" [R R R],
    Medium => "MEDIUM" [K K K],
    Mediumblob => "MEDIUMBLOB" [R R R],
    Mediumint => "MEDIUMINT" [R R R],
    Mediumtext => "MEDIUMTEXT" [R R R],
    Memory => "MEMORY" [K K K],
    Merge => "MERGE" [K K K],
    Microsecond => "MICROSECOND" [K K K],
    Middleint => "MIDDLEINT" [R R R],
    MinRows => "MIN_ROWS" [K K K],
    Minute => "MINUTE" [K K K],
    MinuteMicrosecond => "MINUTE_MICROSECOND" [R R R],
    MinuteSecond => "MINUTE_SECOND" [R R R],
    Mod => "MOD" [R R R],
    Mode => "MODE" [K K K],
    Modifies => "MODIFIES" [R R R],
    Modify => "MODIFY" [K K K],
    Month => "MONTH" [K K K],
    Name => "NAME" [K K K],
    Names => "NAMES" [K K K],
    National => "NATIONAL" [K K K],
    Natural => "NATURAL" [R R R],
    Nchar => "NCHAR" [K K K],
    Next => "NEXT" [K K K],
    No => "NO" [K K K],
    NoWriteToBinlog => "NO_WRITE_TO_BINLOG" [R R R],
    None => "NONE" [K K K],
    Not => "NOT" [R R R],
    Nowait => "NOWAIT" [X X K],
    NthValue => "NTH_VALUE" [X X R],
    Ntile => "NTILE" [X X R],
    Null => "NULL" [R R R],
    Nulls => "NULLS" [X X K],
    Numeric => "NUMERIC" [R R R],
    Nvarchar => "NVARCHAR" [K K K],
    Of => "OF" [X X R],
    Offline => "OFFLINE" [K K K],
    Offset => "OFFSET" [K K K],
    On => "ON" [R R R],
    Online => "ONLINE" [K K K],
    Only => "ONLY" [K K K],
    Open => "OPEN" [K K K],
    Optimize => "OPTIMIZE" [R R R],
    OptimizerCosts => "OPTIMIZER_COSTS" [X R R],
    Option => "OPTION" [R R R],
    Optionally => "OPTIONALLY" [R R R],
    Options => "OPTIONS" [K K K],
    Or => "OR" [R R R],
    Order => "ORDER" [R R R],
    Out => "OUT" [R R R],
    Outer => "OUTER" [R R R],
    Outfile => "OUTFILE" [R R R],
    Over => "OVER" [X X R],
    Owner => "OWNER" [K K K],
    PackKeys => "PACK_KEYS" [K K K],
    Parser => "PARSER" [K K K],
    Partial => "PARTIAL" [K K K],
    Partition => "PARTITION" [R R R],
    Partitioning => "PARTITIONING" [K K K],
    Partitions => "PARTITIONS" [K K K],
    Password => "PASSWORD" [K K K],
    PercentRank => "PERCENT_RANK" [X X R],
    Persist => "PERSIST" [X X K],
    PersistOnly => "PERSIST_ONLY" [X X K],
    Phase => "PHASE" [K K K],
    Plugin => "PLUGIN" [K K K],
    Plugins => "PLUGINS" [K K K],
    Port => "PORT" [K K K],
    Preceding => "PRECEDING" [X X K],
    Precision => "PRECISION" [R R R],
    Prepare => "PREPARE" [K K K],
    Preserve => "PRESERVE" [K K K],
    Prev => "PREV" [K K K],
    Primary => "PRIMARY" [R R R],
    Privileges => "PRIVILEGES" [K K K],
    Procedure => "PROCEDURE" [R R R],
    Processlist => "PROCESSLIST" [K K K],
    Profile => "PROFILE" [K K K],
    Profiles => "PROFILES" [K K K],
    Proxy => "PROXY" [K K K],
    Purge => "PURGE" [R R R],
    Quarter => "QUARTER" [K K K],
    Query => "QUERY" [K K K],
    Quick => "QUICK" [K K K],
    Range => "RANGE" [R R R],
    Rank => "RANK" [X X R],
    Read => "READ" [R R R],
    ReadOnly => "READ_ONLY" [K K K],
    ReadWrite => "READ_WRITE" [R R R],
    Reads => "READS" [R R R],
    Real => "REAL" [R R R],
    Rebuild => "REBUILD" [K K K],
    Recover => "RECOVER" [K K K],
    Recursive => "RECURSIVE" [X X R],
    Redundant => "REDUNDANT" [K K K],
    References => "REFERENCES" [R R R],
    Regexp => "REGEXP" [R R R],
    Relaylog => "RELAYLOG" [K K K],
    Release => "RELEASE" [R R R],
    Reload => "RELOAD" [K K K],
    Remove => "REMOVE" [K K K],
    Rename => "RENAME" [R R R],
    Reorganize => "REORGANIZE" [K K K],
    Repair => "REPAIR" [K K K],
    Repeat => "REPEAT" [R R R],
    Repeatable => "REPEATABLE" [K K K],
    Replace => "REPLACE" [R R R],
    Replication => "REPLICATION" [K K K],
    Require => "REQUIRE" [R R R],
    Reset => "RESET" [K K K],
    Resignal => "RESIGNAL" [R R R],
    Restrict => "RESTRICT" [R R R],
    Resume => "RESUME" [K K K],
    Return => "RETURN" [R R R],
    Returns => "RETURNS" [K K K],
    Reverse => "REVERSE" [K K K],
    Revoke => "REVOKE" [R R R],
    Right => "RIGHT" [R R R],
    Rlike => "RLIKE" [R R R],
    Role => "ROLE" [X X K],
    Rollback => "ROLLBACK" [K K K],
    Rollup => "ROLLUP" [K K K],
    Routine => "ROUTINE" [K K K],
    Row => "ROW" [K K R],
    RowFormat => "ROW_FORMAT" [K K K],
    RowNumber => "ROW_NUMBER" [X X R],
    Rows => "ROWS" [K K R],
    Savepoint => "SAVEPOINT" [K K K],
    Schedule => "SCHEDULE" [K K K],
    Schema => "SCHEMA" [R R R],
    Schemas => "SCHEMAS" [R R R],
    Second => "SECOND" [K K K],
    SecondMicrosecond => "SECOND_MICROSECOND" [R R R],
    Security => "SECURITY" [K K K],
    Select => "SELECT" [R R R],
    Sensitive => "SENSITIVE" [R R R],
    Separator => "SEPARATOR" [R R R],
    Serial => "SERIAL" [K K K],
    Serializable => "SERIALIZABLE" [K K K],
    Server => "SERVER" [K K K],
    Session => "SESSION" [K K K],
    Set => "SET" [R R R],
    Share => "SHARE" [K K K],
    Show => "SHOW" [R R R],
    Shutdown => "SHUTDOWN" [K K K],
    Signal => "SIGNAL" [R R R],
    Signed => "SIGNED" [K K K],
    Simple => "SIMPLE" [K K K],
    Skip => "SKIP" [X X K],
    Slave => "SLAVE" [K K K],
    Slow => "SLOW" [K K K],
    Smallint => "SMALLINT" [R R R],
    Snapshot => "SNAPSHOT" [K K K],
    Socket => "SOCKET" [K K K],
    Some => "SOME" [K K K],
    Soname => "SONAME" [K K K],
    Sounds => "SOUNDS" [K K K],
    Source => "SOURCE" [K K K],
    Spatial => "SPATIAL" [R R R],
    Specific => "SPECIFIC" [R R R],
    Sql => "SQL" [R R R],
    SqlBigResult => "SQL_BIG_RESULT" [R R R],
    SqlBufferResult => "SQL_BUFFER_RESULT" [K K K],
    SqlCache => "SQL_CACHE" [K K X],
    SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS" [R R R],
    SqlNoCache => "SQL_NO_CACHE" [K K K],
    SqlSmallResult => "SQL_SMALL_RESULT" [R R R],
    Sqlexception => "SQLEXCEPTION" [R R R],
    Sqlstate => "SQLSTATE" [R R R],
    Sqlwarning => "SQLWARNING" [R R R],
    Ssl => "SSL" [R R R],
    Start => "START" [K K K],
    Starting => "STARTING" [R R R],
    Starts => "STARTS" [K K K],
    Status => "STATUS" [K K K],
    Stop => "STOP" [K K K],
    Storage => "STORAGE" [K K K],
    Stored => "STORED" [X R R],
    StraightJoin => "STRAIGHT_JOIN" [R R R],
    String => "STRING" [K K K],
    Subject => "SUBJECT" [K K K],
    Subpartition => "SUBPARTITION" [K K K],
    Subpartitions => "SUBPARTITIONS" [K K K],
    Super => "SUPER" [K K K],
    Suspend => "SUSPEND" [K K K],
    System => "SYSTEM" [X X R],
    Table => "TABLE" [R R R],
    Tables => "TABLES" [K K K],
    Tablespace => "TABLESPACE" [K K K],
    Temporary => "TEMPORARY" [K K K],
    Temptable => "TEMPTABLE" [K K K],
    Terminated => "TERMINATED" [R R R],
    Text => "TEXT" [K K K],
    Than => "THAN" [K K K],
    Then => "THEN" [R R R],
    Time => "TIME" [K K K],
    Timestamp => "TIMESTAMP" [K K K],
    Tinyblob => "TINYBLOB" [R R R],
    Tinyint => "TINYINT" [R R R],
    Tinytext => "TINYTEXT" [R R R],
    To => "TO" [R R R],
    Trailing => "TRAILING" [R R R],
    Transaction => "TRANSACTION" [K K K],
    Trigger => "TRIGGER" [R R R],
    Triggers => "TRIGGERS" [K K K],
    True => "TRUE" [R R R],
    Truncate => "TRUNCATE" [K K K],
    Type => "TYPE" [K K K],
    Uncommitted => "UNCOMMITTED" [K K K],
    Undefined => "UNDEFINED" [K K K],
    Undo => "UNDO" [R R R],
    Uninstall => "UNINSTALL" [K K K],
    Union => "UNION" [R R R],
    Unique => "UNIQUE" [R R R],
    Unknown => "UNKNOWN" [K K K],
    Unlock => "UNLOCK" [R R R],
    Unsigned => "UNSIGNED" [R R R],
    Until => "UNTIL" [K K K],
    Update => "UPDATE" [R R R],
    Upgrade => "UPGRADE" [K K K],
    Usage => "USAGE" [R R R],
    Use => "USE" [R R R],
    UseFrm => "USE_FRM" [K K K],
    User => "USER" [K K K],
    Using => "USING" [R R R],
    UtcDate => "UTC_DATE" [R R R],
    UtcTime => "UTC_TIME" [R R R],
    UtcTimestamp => "UTC_TIMESTAMP" [R R R],
    Validation => "VALIDATION" [X K K],
    Value => "VALUE" [K K K],
    Values => "VALUES" [R R R],
    Varbinary => "VARBINARY" [R R R],
    Varchar => "VARCHAR" [R R R],
    Varcharacter => "VARCHARACTER" [R R R],
    Variables => "VARIABLES" [K K K],
    Varying => "VARYING" [R R R],
    View => "VIEW" [K K K],
    Virtual => "VIRTUAL" [X R R],
    Visible => "VISIBLE" [X X K],
    Wait => "WAIT" [K K K],
    Warnings => "WARNINGS" [K K K],
    Week => "WEEK" [K K K],
    When => "WHEN" [R R R],
    Where => "WHERE" [R R R],
    While => "WHILE" [R R R],
    Window => "WINDOW" [X X R],
    With => "WITH" [R R R],
    Without => "WITHOUT" [K K K],
    Work => "WORK" [K K K],
    Wrapper => "WRAPPER" [K K K],
    Write => "WRITE" [R R R],
    X509 => "X509" [K K K],
    Xa => "XA" [K K K],
    Xml => "XML" [K K K],
    Xor => "XOR" [R R R],
    Year => "YEAR" [K K K],
    YearMonth => "YEAR_MONTH" [R R R],
    Zerofill => "ZEROFILL" [R R R],
}

impl Keyword {
    /// Returns every keyword the tokenizer knows, in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        Self::ALL
    }

    /// Returns the status of this keyword in the given server family.
    #[must_use]
    pub const fn status(self, family: VersionFamily) -> KeywordStatus {
        let statuses = self.statuses();
        match family {
            VersionFamily::V5_6 => statuses[0],
            VersionFamily::V5_7 => statuses[1],
            VersionFamily::V8_0 => statuses[2],
        }
    }

    /// Returns true if the word is a keyword at all in the given family.
    #[must_use]
    pub fn is_available(self, family: VersionFamily) -> bool {
        self.status(family) != KeywordStatus::Absent
    }

    /// Returns true if the keyword is reserved in the given family.
    #[must_use]
    pub fn is_reserved(self, family: VersionFamily) -> bool {
        self.status(family) == KeywordStatus::Reserved
    }
}

impl Serialize for Keyword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl core::fmt::Display for Keyword {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_word() {
        assert_eq!(Keyword::from_word("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_word("users"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::AutoIncrement.as_str(), "AUTO_INCREMENT");
        assert_eq!(Keyword::X509.as_str(), "X509");
    }

    #[test]
    fn test_all_keywords_round_trip() {
        for keyword in Keyword::all() {
            assert_eq!(Keyword::from_word(keyword.as_str()), Some(*keyword));
        }
    }

    #[test]
    fn test_role_is_new_in_8_0() {
        assert!(!Keyword::Role.is_available(VersionFamily::V5_7));
        assert!(Keyword::Role.is_available(VersionFamily::V8_0));
        assert!(!Keyword::Role.is_reserved(VersionFamily::V8_0));
    }

    #[test]
    fn test_reservation_changes_between_families() {
        assert!(!Keyword::Function.is_reserved(VersionFamily::V5_7));
        assert!(Keyword::Function.is_reserved(VersionFamily::V8_0));
        assert!(Keyword::Generated.is_reserved(VersionFamily::V5_7));
        assert!(!Keyword::Generated.is_available(VersionFamily::V5_6));
    }
}
