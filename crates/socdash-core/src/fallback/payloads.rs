//! Pre-authored payloads served when the backend is unreachable.
//!
//! Shapes mirror what the dashboard views read from the live API.

use serde_json::{json, Value as JsonValue};

pub fn dashboard_stats() -> JsonValue {
    json!({
        "total_agents": 12,
        "active_agents": 10,
        "offline_agents": 2,
        "total_alerts": 47,
        "critical_alerts": 3,
        "high_alerts": 9,
        "medium_alerts": 21,
        "low_alerts": 14,
        "threats_detected": 18,
        "threats_blocked": 16,
        "events_last_24h": 15234,
        "system_health": "healthy",
        "uptime_percent": 99.7,
        "last_updated": "2024-01-15T10:30:00Z"
    })
}

pub fn agents() -> JsonValue {
    json!({
        "agents": [
            {
                "id": "agent-001",
                "hostname": "web-server-01",
                "ip_address": "10.0.1.10",
                "os": "Ubuntu 22.04 LTS",
                "status": "online",
                "version": "2.4.1",
                "last_seen": "2024-01-15T10:29:45Z",
                "cpu_usage": 34.2,
                "memory_usage": 61.8,
                "alerts_count": 5
            },
            {
                "id": "agent-002",
                "hostname": "db-server-01",
                "ip_address": "10.0.2.20",
                "os": "Rocky Linux 9",
                "status": "online",
                "version": "2.4.1",
                "last_seen": "2024-01-15T10:29:50Z",
                "cpu_usage": 72.5,
                "memory_usage": 83.1,
                "alerts_count": 12
            },
            {
                "id": "agent-003",
                "hostname": "workstation-17",
                "ip_address": "10.0.5.117",
                "os": "Windows 11 Pro",
                "status": "offline",
                "version": "2.3.9",
                "last_seen": "2024-01-15T06:12:03Z",
                "cpu_usage": 0.0,
                "memory_usage": 0.0,
                "alerts_count": 1
            }
        ],
        "total": 3
    })
}

pub fn alerts() -> JsonValue {
    json!({
        "alerts": [
            {
                "id": "alert-1001",
                "title": "Multiple failed SSH logins",
                "severity": "high",
                "status": "open",
                "source": "web-server-01",
                "rule": "auth_bruteforce",
                "timestamp": "2024-01-15T10:21:07Z",
                "description": "27 failed SSH authentication attempts from 203.0.113.45 within 60 seconds"
            },
            {
                "id": "alert-1002",
                "title": "Suspicious PowerShell execution",
                "severity": "critical",
                "status": "investigating",
                "source": "workstation-17",
                "rule": "encoded_powershell",
                "timestamp": "2024-01-15T05:58:44Z",
                "description": "Base64-encoded PowerShell command spawned by Office process"
            },
            {
                "id": "alert-1003",
                "title": "Database CPU saturation",
                "severity": "medium",
                "status": "acknowledged",
                "source": "db-server-01",
                "rule": "resource_threshold",
                "timestamp": "2024-01-15T09:44:19Z",
                "description": "CPU usage above 90% for more than 10 minutes"
            }
        ],
        "total": 3
    })
}

pub fn threats() -> JsonValue {
    json!({
        "threats": [
            {
                "id": "threat-501",
                "name": "SSH brute force campaign",
                "type": "brute_force",
                "severity": "high",
                "status": "blocked",
                "source_ip": "203.0.113.45",
                "target": "web-server-01",
                "detected_at": "2024-01-15T10:21:10Z",
                "mitre_technique": "T1110"
            },
            {
                "id": "threat-502",
                "name": "Malicious macro dropper",
                "type": "malware",
                "severity": "critical",
                "status": "contained",
                "source_ip": null,
                "target": "workstation-17",
                "detected_at": "2024-01-15T05:58:50Z",
                "mitre_technique": "T1204.002"
            }
        ],
        "total": 2
    })
}

pub fn system_status() -> JsonValue {
    json!({
        "status": "operational",
        "version": "1.0.0",
        "components": {
            "api": "healthy",
            "database": "healthy",
            "event_pipeline": "healthy",
            "detection_engine": "degraded"
        },
        "cpu_usage": 41.3,
        "memory_usage": 58.9,
        "disk_usage": 63.2,
        "uptime_seconds": 864000
    })
}

pub fn events() -> JsonValue {
    json!({
        "events": [
            {
                "id": "evt-90001",
                "type": "authentication",
                "action": "login_failed",
                "host": "web-server-01",
                "user": "root",
                "source_ip": "203.0.113.45",
                "timestamp": "2024-01-15T10:21:05Z"
            },
            {
                "id": "evt-90002",
                "type": "process",
                "action": "process_created",
                "host": "workstation-17",
                "user": "jdoe",
                "process": "powershell.exe",
                "timestamp": "2024-01-15T05:58:44Z"
            },
            {
                "id": "evt-90003",
                "type": "network",
                "action": "connection_blocked",
                "host": "web-server-01",
                "destination": "198.51.100.7:4444",
                "timestamp": "2024-01-15T10:22:31Z"
            }
        ],
        "total": 3
    })
}

pub fn realtime() -> JsonValue {
    json!({
        "events_per_second": 176,
        "active_connections": 342,
        "alerts_last_minute": 2,
        "blocked_requests_last_minute": 14,
        "top_sources": [
            { "ip": "203.0.113.45", "count": 27 },
            { "ip": "198.51.100.7", "count": 9 }
        ],
        "timestamp": "2024-01-15T10:30:00Z"
    })
}
