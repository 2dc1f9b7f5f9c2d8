/*
    ABSTRACT: Registers a threat event callback with an in-process fabric and prints every threat
    event it receives. Payload files given on the command line are published to the ePO threat
    event topic, without arguments a bundled sample event is published instead.
*/
use serde_json::Value;
use std::sync::Arc;
use threat_event_client::{
    config::Settings,
    constants::{EventProps, ThreatEventProps},
    telemetry, CommonThreatEventClient, Event, EventBus, EventDispatchResult, ThreatEventCallback,
    EPO_THREAT_EVENT_RESPONSE_TOPIC,
};
use tracing::{error, info, warn};
use uuid::Uuid;

const SAMPLE_THREAT_EVENT: &str = r#"{
    "event": {
        "analyzer": {
            "contentVersion": "",
            "detectedUTC": "2016-12-13T22:18:34.000Z",
            "detectionMethod": "Exploit Prevention",
            "engineVersion": "",
            "hostName": "SAMPLE-HOSTNAME",
            "id": "ENDP_AM_1020",
            "ipv4": "10.0.0.10",
            "ipv6": "0:0:0:0:0:FFFF:0A00:0010",
            "mac": "001122334455",
            "name": "McAfee Endpoint Security",
            "version": "10.5.0"
        },
        "category": "Host intrusion buffer overflow",
        "entity": {
            "groupName": null,
            "id": "11111111-2222-3333-4444-555555555555",
            "osPlatform": "Workstation",
            "osType": "Windows 7",
            "ruleName": null,
            "sessionId": null,
            "type": "device"
        },
        "eventDesc": "Buffer Overflow detected and blocked (GBOP)",
        "files": [],
        "id": 18052,
        "otherData": {
            "count": "1",
            "definedAt": "My Organization",
            "distinctCountOfSourceHostName": "2",
            "listOfSourceIPV4": "10.0.0.1,10.0.0.2,10.0.0.3,10.0.0.3",
            "responseEventType": "Threat",
            "responseRuleName": "Send Threat Event via DXL",
            "setOfSourceHostName": "host-a,host-b",
            "threatSeverityString": "Critical"
        },
        "source": {
            "hostName": "",
            "ipv4": "10.0.0.10",
            "ipv6": "0:0:0:0:0:FFFF:0A00:0010",
            "mac": "",
            "port": null,
            "processName": "",
            "url": "",
            "userName": ""
        },
        "target": {
            "fileName": "C:\\DAC\\IEXPLORE.EXE",
            "hostName": "SAMPLE-HOSTNAME",
            "ipv4": "10.0.0.10",
            "ipv6": "0:0:0:0:0:FFFF:0A00:0010",
            "mac": "",
            "port": 0,
            "processName": "IEXPLORE.EXE",
            "protocol": "",
            "userName": "SAMPLE-HOSTNAME\\Administrator"
        },
        "threatActionTaken": "blocked",
        "threatHandled": 1,
        "threatName": "ExP:Heap",
        "threatSeverity": 2,
        "threatType": "Exploit Prevention",
        "uri": null
    },
    "eventMessageType": "McAfee Common Event",
    "eventMessageVersion": "1.0"
}"#;

struct PrintingThreatEventCallback {
    id: Uuid,
    settings: Settings,
}

impl PrintingThreatEventCallback {
    fn render(&self, threat_event: &Value) -> threat_event_client::Result<String> {
        let mut threat_event = threat_event.clone();
        if self.settings.normalize_other_data {
            if let Some(other_data) = threat_event_client::take_other_data(&mut threat_event) {
                let converted = threat_event_client::convert_aggregate_fields(other_data)?;
                let converted = serde_json::to_value(converted)?;
                if let Some(event) = threat_event
                    .get_mut(ThreatEventProps::EVENT)
                    .and_then(Value::as_object_mut)
                {
                    event.insert(EventProps::OTHER_DATA.to_string(), converted);
                }
            }
        }

        if self.settings.pretty {
            Ok(format!("{:#}", threat_event))
        } else {
            Ok(threat_event.to_string())
        }
    }
}

impl ThreatEventCallback for PrintingThreatEventCallback {
    fn id(&self) -> &Uuid {
        &self.id
    }

    fn on_threat_event(&self, threat_event: &Value, original_event: &Event) {
        println!("Threat event on topic: {}", original_event.destination_topic());
        match self.render(threat_event) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => error!(error = %e, "Failed to render threat event"),
        }
    }
}

fn main() -> threat_event_client::Result<()> {
    let settings = Settings::load()?;
    telemetry::init_tracing(&settings.log_filter);

    let bus = EventBus::new();
    let client = CommonThreatEventClient::new(&bus);
    let callback = Arc::new(PrintingThreatEventCallback {
        id: Uuid::new_v4(),
        settings,
    });
    client.add_epo_threat_event_response_callback(&callback);
    info!(topic = EPO_THREAT_EVENT_RESPONSE_TOPIC, "Waiting for threat events");

    let mut payloads = Vec::new();
    for path in std::env::args().skip(1) {
        match std::fs::read(&path) {
            Ok(payload) => payloads.push(payload),
            Err(e) => warn!(path = %path, error = %e, "Skipping unreadable payload file"),
        }
    }
    if payloads.is_empty() {
        payloads.push(SAMPLE_THREAT_EVENT.as_bytes().to_vec());
    }

    for payload in payloads {
        let result = bus.send_event(&Event::new(EPO_THREAT_EVENT_RESPONSE_TOPIC, payload));
        if let EventDispatchResult::FinishedWithFailures(failures) = result {
            warn!(failures, "Threat event could not be delivered");
        }
    }

    client.remove_epo_threat_event_response_callback(&*callback);
    Ok(())
}
