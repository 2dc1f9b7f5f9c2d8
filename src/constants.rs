/*
    ABSTRACT: Property names used inside threat event payloads. These are wire-format literals
    shared with every producer of threat events and must not be changed.
*/

/// Topic used to subscribe to ePO threat events sent from Automatic Responses.
pub const EPO_THREAT_EVENT_RESPONSE_TOPIC: &str = "/mcafee/event/epo/threat/response";

/// `otherData` keys containing this marker carry an ordered, comma-joined list of values.
pub const LIST_OF_MARKER: &str = "listOf";

/// `otherData` keys containing this marker carry a comma-joined set of values.
pub const SET_OF_MARKER: &str = "setOf";

/// Top level members of a threat event.
#[derive(Debug, Clone, Copy)]
pub struct ThreatEventProps;

impl ThreatEventProps {
    /// Type of message, e.g. `"McAfee Common Event"`.
    pub const EVENT_MESSAGE_TYPE: &'static str = "eventMessageType";
    /// Version number of the event message, e.g. `"1.0"`.
    pub const EVENT_MESSAGE_VERSION: &'static str = "eventMessageVersion";
    /// Member holding the event data. See `EventProps`.
    pub const EVENT: &'static str = "event";
    /// The time that the threat event was received by ePO.
    pub const RECEIVED_UTC: &'static str = "_receivedUTC";
}

/// The standard set of properties included with each `event` member.
#[derive(Debug, Clone, Copy)]
pub struct EventProps;

impl EventProps {
    pub const CATEGORY: &'static str = "category";
    pub const EVENT_DESCRIPTION: &'static str = "eventDesc";
    /// External ID designated for the event, e.g. the Windows event id `"10016"`.
    pub const EVENT_ID: &'static str = "id";
    pub const THREAT_ACTION_TAKEN: &'static str = "threatActionTaken";
    /// Whether the threat was handled. Null if the event is not threat oriented.
    pub const THREAT_HANDLED: &'static str = "threatHandled";
    /// Name of the threat, such as a virus or a firewall rule name.
    pub const THREAT_NAME: &'static str = "threatName";
    /// Severity on a numeric scale, 1 (highest) to 7 (lowest).
    pub const THREAT_SEVERITY: &'static str = "threatSeverity";
    /// Analyzer-dependent classification of the event type.
    pub const THREAT_TYPE: &'static str = "threatType";
    pub const URI: &'static str = "uri";
    /// Member holding `AnalyzerProps`.
    pub const ANALYZER: &'static str = "analyzer";
    /// Member holding `EntityProps`.
    pub const ENTITY: &'static str = "entity";
    /// Member holding a list of file members, each keyed by `FilesProps`.
    pub const FILES: &'static str = "files";
    /// Member holding additional data selected by the sender, including aggregate fields.
    pub const OTHER_DATA: &'static str = "otherData";
    /// Member holding `SourceProps`.
    pub const SOURCE: &'static str = "source";
    /// Member holding `TargetProps`.
    pub const TARGET: &'static str = "target";
}

/// Properties of the analyzer which detected the threat.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerProps;

impl AnalyzerProps {
    pub const CONTENT_VERSION: &'static str = "contentVersion";
    pub const DETECTION_METHOD: &'static str = "detectionMethod";
    pub const DETECTED_UTC: &'static str = "detectedUTC";
    pub const ENGINE_VERSION: &'static str = "engineVersion";
    pub const HOST_NAME: &'static str = "hostName";
    /// Analogous to the ePO SoftwareID or ProductCode.
    pub const ID: &'static str = "id";
    pub const IPV4: &'static str = "ipv4";
    pub const IPV6: &'static str = "ipv6";
    pub const MAC: &'static str = "mac";
    pub const NAME: &'static str = "name";
    pub const VERSION: &'static str = "version";
}

/// Properties of the entity the threat event was identified for.
#[derive(Debug, Clone, Copy)]
pub struct EntityProps;

impl EntityProps {
    pub const GROUP_NAME: &'static str = "groupName";
    /// A unique id referencing the entity, e.g. an agent GUID or a user SID.
    pub const ID: &'static str = "id";
    /// The entity's location in the ePO system tree.
    pub const NODE_TEXT_PATH: &'static str = "_nodeTextPath";
    pub const OS_PLATFORM: &'static str = "osPlatform";
    pub const OS_TYPE: &'static str = "osType";
    pub const RULE_NAME: &'static str = "ruleName";
    pub const SESSION_ID: &'static str = "sessionID";
    pub const TYPE: &'static str = "type";
}

#[derive(Debug, Clone, Copy)]
pub struct FilesProps;

impl FilesProps {
    pub const NAME: &'static str = "name";
    /// Member holding the file hashes, keyed by `HashProps`.
    pub const HASH: &'static str = "hash";
}

/// Hash type names found in a file's `hash` member.
#[derive(Debug, Clone, Copy)]
pub struct HashProps;

impl HashProps {
    pub const MD5: &'static str = "MD5";
    pub const SHA1: &'static str = "SHA-1";
    pub const SHA256: &'static str = "SHA-256";
}

#[derive(Debug, Clone, Copy)]
pub struct SourceProps;

impl SourceProps {
    pub const HOST_NAME: &'static str = "hostName";
    pub const IPV4: &'static str = "ipv4";
    pub const IPV6: &'static str = "ipv6";
    pub const MAC: &'static str = "mac";
    pub const PORT: &'static str = "port";
    pub const PROCESS_NAME: &'static str = "processName";
    pub const URL: &'static str = "url";
    /// User name or email address.
    pub const USER_NAME: &'static str = "userName";
}

#[derive(Debug, Clone, Copy)]
pub struct TargetProps;

impl TargetProps {
    pub const FILE_NAME: &'static str = "fileName";
    pub const HOST_NAME: &'static str = "hostName";
    pub const IPV4: &'static str = "ipv4";
    pub const IPV6: &'static str = "ipv6";
    pub const MAC: &'static str = "mac";
    pub const PORT: &'static str = "port";
    pub const PROCESS_NAME: &'static str = "processName";
    pub const PROTOCOL: &'static str = "protocol";
    pub const USER_NAME: &'static str = "userName";
}
