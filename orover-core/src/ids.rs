//! Closed identifier taxonomy for the oRover control plane.
//!
//! Every numeric identifier used on the bus belongs to exactly one of eleven
//! disjoint sets (§3 of the data model: priorities, lifecycle concepts, and
//! the `origin`/`actuator`/`controller`/`cmd`/`state`/`event` message fields).
//! Membership is recoverable from the numeric value alone, so `set_of`,
//! `name_of` and `value_of` are pure, total and O(1): no table is built or
//! mutated at runtime, every branch is a compile-time match.

// Layer 1: Standard library imports
use std::fmt;
#[cfg(test)]
use std::collections::HashSet;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// Declares a closed, `#[repr(i32)]` identifier set with name/value lookups.
macro_rules! taxonomy_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $value),+
        }

        impl $name {
            /// Human-readable set name, as used in the `"<set>.<member>"` topic form.
            pub const SET_NAME: &'static str = stringify!($name);

            /// Every member of this set, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// This member's numeric value.
            pub fn value(self) -> i32 {
                self as i32
            }

            /// Resolve a numeric value to a member of this set, if it is one.
            pub fn try_from_value(value: i32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// This member's bare name (without the set prefix), e.g. `"shutdown"`.
            ///
            /// A trailing underscore is trimmed, so a variant named to dodge a
            /// Rust keyword (`move_` for the Python source's `move`) still
            /// reports its true topic name (`"move"`).
            pub fn member_name(self) -> &'static str {
                let raw = match self {
                    $(Self::$variant => stringify!($variant),)+
                };
                raw.trim_end_matches('_')
            }

            /// Resolve a bare member name to a value of this set, if it names one.
            pub fn try_from_member_name(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($variant).trim_end_matches('_') {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}", Self::SET_NAME, self.member_name())
            }
        }
    };
}

taxonomy_set! {
    /// Message routing priority. Range is the discrete set `{1, 5, 10}`, not a span.
    #[derive(PartialOrd, Ord)]
    priority {
        low = 1,
        normal = 5,
        high = 10,
    }
}

taxonomy_set! {
    /// Robot-wide operational mode.
    operational_mode {
        idle = 100,
        active = 101,
        maintenance = 102,
    }
}

taxonomy_set! {
    /// Robot-wide lifecycle stage.
    ///
    /// `stage_shutdown` (not `shutdown`) because the bare name `"shutdown"`
    /// already names `cmd::shutdown`: every member name must be globally
    /// unique across all eleven sets so `value_of`'s unqualified lookup (§9)
    /// resolves unambiguously.
    lifecycle_stage {
        startup = 200,
        running = 201,
        stage_shutdown = 202,
    }
}

taxonomy_set! {
    /// Active power source.
    ///
    /// `on_battery` (not `battery`) to avoid colliding with `state::battery`;
    /// see `lifecycle_stage`'s doc comment.
    power_source {
        on_battery = 300,
        mains = 301,
        solar = 302,
    }
}

taxonomy_set! {
    /// Aggregate health status.
    health_status {
        healthy = 400,
        warning = 401,
        critical = 402,
    }
}

taxonomy_set! {
    /// Every sensor and virtual producer, including the synthetic heartbeat
    /// source.
    ///
    /// `heartbeat_source` and `test_message_source` carry a `_source` suffix
    /// because `heartbeat`/`test_message` already name members of `event`;
    /// see `lifecycle_stage`'s doc comment for why bare names must be unique.
    origin {
        heartbeat_source = 1000,
        sensor_ultrasonic_front = 1001,
        sensor_ultrasonic_rear = 1002,
        sensor_ultrasonic_left = 1003,
        sensor_ultrasonic_right = 1004,
        sensor_lidar = 1010,
        sensor_camera_front = 1020,
        sensor_camera_rear = 1021,
        sensor_imu = 1030,
        sensor_gps = 1040,
        sensor_wheel_encoder_left = 1050,
        sensor_wheel_encoder_right = 1051,
        sensor_temperature = 1060,
        sensor_battery = 1070,
        sensor_collision_front = 1080,
        sensor_collision_rear = 1081,
        sensor_collision_top = 1082,
        test_message_source = 1090,
    }
}

taxonomy_set! {
    /// Physical actuators.
    actuator {
        motor_wheels = 2000,
        arm_joint_1 = 2010,
        arm_joint_2 = 2011,
        gripper = 2020,
    }
}

taxonomy_set! {
    /// Named subsystem controllers.
    controller {
        motion_controller = 3000,
        power_manager = 3010,
        safety_system = 3020,
        vision_system = 3030,
        navigation_system = 3040,
        path_planner = 3050,
        remote_interface = 3060,
    }
}

taxonomy_set! {
    /// Commanded actions.
    cmd {
        start = 4000,
        stop = 4001,
        pause = 4002,
        resume = 4003,
        shutdown = 4004,
        reboot = 4005,
        reset = 4006,

        move_ = 4100,
        moveTo = 4101,
        rotate = 4102,
        setVelocity = 4103,
        stopMotion = 4104,
        dock = 4105,
        undock = 4106,
        set_motor_speed = 4107,

        setPosition = 4200,
        setSpeed = 4201,
        setTorque = 4202,
        open = 4203,
        close = 4204,
        enable = 4205,
        disable = 4206,

        calibratesensor = 4300,
        startStream = 4301,
        stopStream = 4302,
        setRate = 4303,
        setRange = 4304,

        getParam = 4400,
        setParam = 4401,
        loadProfile = 4402,
        saveProfile = 4403,
    }
}

taxonomy_set! {
    /// Queried state readings.
    state {
        system_mode = 5000,
        system_lifecycle = 5001,
        system_health = 5002,
        system_uptime = 5003,

        pose = 5100,
        velocity = 5101,
        goal = 5102,
        motion = 5103,

        battery = 5200,
        charging = 5201,
        power_source = 5202,
        power_temperature = 5203,

        actuator_speed = 5301,
        actuator_enabled = 5302,
        actuator_load = 5303,

        sensor_status = 5400,
        sensor_lastupdate = 5401,
        sensor_signalquality = 5402,
        sensor_datarate = 5403,
    }
}

taxonomy_set! {
    /// Asynchronous notifications.
    event {
        emergencyStop = 6000,
        collisionDetected = 6001,
        obstacleDetected = 6002,
        overcurrent = 6003,
        overtemperature = 6004,
        lowBattery = 6005,

        startupComplete = 6100,
        shutdownInitiated = 6101,
        modeChanged = 6102,
        faultRaised = 6103,
        faultCleared = 6104,

        goalReached = 6200,
        goalFailed = 6201,
        docked = 6202,
        undocked = 6203,

        object_detected = 6300,
        pathBlocked = 6301,
        marker_detected = 6302,
        human_detected = 6303,
        lineLost_detected = 6304,

        manualOverride = 6400,
        remoteCommand = 6401,
        heartbeat = 6402,
        configChanged = 6403,
        test_message = 6499,
    }
}

/// Tag identifying which of the eleven closed sets a value belongs to.
///
/// Recoverable from the numeric value alone (I3): each set occupies a
/// disjoint, documented sub-range (priority is the exception, a discrete
/// `{1, 5, 10}` rather than a span).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetTag {
    Priority,
    OperationalMode,
    LifecycleStage,
    PowerSource,
    HealthStatus,
    Origin,
    Actuator,
    Controller,
    Cmd,
    State,
    Event,
}

impl SetTag {
    /// The set name as used in topic strings, e.g. `"event"`.
    pub fn set_name(self) -> &'static str {
        match self {
            Self::Priority => priority::SET_NAME,
            Self::OperationalMode => operational_mode::SET_NAME,
            Self::LifecycleStage => lifecycle_stage::SET_NAME,
            Self::PowerSource => power_source::SET_NAME,
            Self::HealthStatus => health_status::SET_NAME,
            Self::Origin => origin::SET_NAME,
            Self::Actuator => actuator::SET_NAME,
            Self::Controller => controller::SET_NAME,
            Self::Cmd => cmd::SET_NAME,
            Self::State => state::SET_NAME,
            Self::Event => event::SET_NAME,
        }
    }
}

/// Union of sets that may legally appear in the envelope's `src` field.
pub fn is_valid_src(value: i32) -> bool {
    matches!(
        set_of(value),
        Some(SetTag::Origin) | Some(SetTag::Actuator) | Some(SetTag::Controller)
    )
}

/// Union of sets that may legally appear in the envelope's `reason` field.
pub fn is_valid_reason(value: i32) -> bool {
    matches!(
        set_of(value),
        Some(SetTag::Cmd) | Some(SetTag::State) | Some(SetTag::Event)
    )
}

/// Whether `value` is a member of the `priority` set.
pub fn is_valid_priority(value: i32) -> bool {
    matches!(set_of(value), Some(SetTag::Priority))
}

/// Determine which closed set a numeric identifier belongs to, from its
/// range alone (I3). Returns `None` if the value is outside every documented
/// range.
pub fn set_of(value: i32) -> Option<SetTag> {
    match value {
        1 | 5 | 10 => Some(SetTag::Priority),
        100..=102 => Some(SetTag::OperationalMode),
        200..=202 => Some(SetTag::LifecycleStage),
        300..=302 => Some(SetTag::PowerSource),
        400..=402 => Some(SetTag::HealthStatus),
        1000..=1099 => Some(SetTag::Origin),
        2000..=2099 => Some(SetTag::Actuator),
        3000..=3099 => Some(SetTag::Controller),
        4000..=4499 => Some(SetTag::Cmd),
        5000..=5499 => Some(SetTag::State),
        6000..=6499 => Some(SetTag::Event),
        _ => None,
    }
}

/// Return `"<setName>.<memberName>"` for a value, or `"<setName>.unknown(<value>)"`
/// if the value falls in a documented range but names no member of it (a
/// range may be sparser than its declared span), or `"unknown.unknown(<value>)"`
/// if the value is outside every set entirely.
pub fn name_of(value: i32) -> String {
    let Some(tag) = set_of(value) else {
        return format!("unknown.unknown({value})");
    };
    let member = match tag {
        SetTag::Priority => priority::try_from_value(value).map(|v| v.member_name()),
        SetTag::OperationalMode => operational_mode::try_from_value(value).map(|v| v.member_name()),
        SetTag::LifecycleStage => lifecycle_stage::try_from_value(value).map(|v| v.member_name()),
        SetTag::PowerSource => power_source::try_from_value(value).map(|v| v.member_name()),
        SetTag::HealthStatus => health_status::try_from_value(value).map(|v| v.member_name()),
        SetTag::Origin => origin::try_from_value(value).map(|v| v.member_name()),
        SetTag::Actuator => actuator::try_from_value(value).map(|v| v.member_name()),
        SetTag::Controller => controller::try_from_value(value).map(|v| v.member_name()),
        SetTag::Cmd => cmd::try_from_value(value).map(|v| v.member_name()),
        SetTag::State => state::try_from_value(value).map(|v| v.member_name()),
        SetTag::Event => event::try_from_value(value).map(|v| v.member_name()),
    };
    match member {
        Some(name) => format!("{}.{name}", tag.set_name()),
        None => format!("{}.unknown({value})", tag.set_name()),
    }
}

/// Resolve a name to its numeric identifier. Accepts either a bare member
/// name (`"shutdown"`) or a qualified `"<setName>.<memberName>"` form
/// (`"cmd.shutdown"`). Names are unique by construction across all eleven
/// sets (§9 open question); when a qualified set name is given, only that
/// set is searched.
pub fn value_of(name: &str) -> Option<i32> {
    if let Some((set_name, member)) = name.split_once('.') {
        return value_of_in_set(set_name, member);
    }
    for set_name in [
        "priority",
        "operational_mode",
        "lifecycle_stage",
        "power_source",
        "health_status",
        "origin",
        "actuator",
        "controller",
        "cmd",
        "state",
        "event",
    ] {
        if let Some(v) = value_of_in_set(set_name, name) {
            return Some(v);
        }
    }
    None
}

fn value_of_in_set(set_name: &str, member: &str) -> Option<i32> {
    match set_name {
        "priority" => priority::try_from_member_name(member).map(|v| v.value()),
        "operational_mode" => operational_mode::try_from_member_name(member).map(|v| v.value()),
        "lifecycle_stage" => lifecycle_stage::try_from_member_name(member).map(|v| v.value()),
        "power_source" => power_source::try_from_member_name(member).map(|v| v.value()),
        "health_status" => health_status::try_from_member_name(member).map(|v| v.value()),
        "origin" => origin::try_from_member_name(member).map(|v| v.value()),
        "actuator" => actuator::try_from_member_name(member).map(|v| v.value()),
        "controller" => controller::try_from_member_name(member).map(|v| v.value()),
        "cmd" => cmd::try_from_member_name(member).map(|v| v.value()),
        "state" => state::try_from_member_name(member).map(|v| v.value()),
        "event" => event::try_from_member_name(member).map(|v| v.value()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn priority_values_are_discrete() {
        assert_eq!(priority::low.value(), 1);
        assert_eq!(priority::normal.value(), 5);
        assert_eq!(priority::high.value(), 10);
        assert!(priority::low < priority::normal);
    }

    #[test]
    fn set_of_classifies_every_documented_range() {
        assert_eq!(set_of(5), Some(SetTag::Priority));
        assert_eq!(set_of(101), Some(SetTag::OperationalMode));
        assert_eq!(set_of(1001), Some(SetTag::Origin));
        assert_eq!(set_of(4107), Some(SetTag::Cmd));
        assert_eq!(set_of(5103), Some(SetTag::State));
        assert_eq!(set_of(6300), Some(SetTag::Event));
        assert_eq!(set_of(9999), None);
    }

    #[test]
    fn set_of_is_disjoint_across_documented_members() {
        let all_values = [1, 5, 10, 100, 101, 102, 200, 201, 202, 300, 301, 302, 400, 401, 402]
            .into_iter()
            .chain(1000..=1090)
            .chain(2000..=2020)
            .chain(3000..=3060)
            .chain([4000, 4107, 4403])
            .chain([5000, 5103, 5403])
            .chain([6000, 6300, 6499]);
        for v in all_values {
            assert!(set_of(v).is_some(), "{v} should belong to exactly one set");
        }
    }

    #[test]
    fn name_of_known_member() {
        assert_eq!(name_of(6300), "event.object_detected");
        assert_eq!(name_of(1001), "origin.sensor_ultrasonic_front");
    }

    #[test]
    fn name_of_sparse_member_in_documented_range() {
        // 4050 is inside the cmd range (4000-4499) but names no defined member.
        assert_eq!(name_of(4050), "cmd.unknown(4050)");
    }

    #[test]
    fn name_of_value_outside_every_set() {
        assert_eq!(name_of(9999), "unknown.unknown(9999)");
    }

    #[test]
    fn value_of_round_trips_with_name_of() {
        assert_eq!(value_of("event.object_detected"), Some(6300));
        assert_eq!(value_of("object_detected"), Some(6300));
        assert_eq!(value_of("shutdown"), Some(cmd::shutdown.value()));
    }

    #[test]
    fn value_of_unknown_name_is_none() {
        assert_eq!(value_of("not_a_real_identifier"), None);
    }

    #[test]
    fn src_and_reason_membership() {
        assert!(is_valid_src(origin::sensor_ultrasonic_front.value()));
        assert!(is_valid_src(controller::remote_interface.value()));
        assert!(!is_valid_src(cmd::shutdown.value()));

        assert!(is_valid_reason(event::object_detected.value()));
        assert!(is_valid_reason(cmd::shutdown.value()));
        assert!(!is_valid_reason(origin::heartbeat_source.value()));
    }

    #[test]
    fn member_names_are_unique_across_every_set() {
        let all_names = priority::ALL
            .iter()
            .map(|v| v.member_name())
            .chain(operational_mode::ALL.iter().map(|v| v.member_name()))
            .chain(lifecycle_stage::ALL.iter().map(|v| v.member_name()))
            .chain(power_source::ALL.iter().map(|v| v.member_name()))
            .chain(health_status::ALL.iter().map(|v| v.member_name()))
            .chain(origin::ALL.iter().map(|v| v.member_name()))
            .chain(actuator::ALL.iter().map(|v| v.member_name()))
            .chain(controller::ALL.iter().map(|v| v.member_name()))
            .chain(cmd::ALL.iter().map(|v| v.member_name()))
            .chain(state::ALL.iter().map(|v| v.member_name()))
            .chain(event::ALL.iter().map(|v| v.member_name()))
            .collect::<Vec<_>>();
        let unique: HashSet<_> = all_names.iter().collect();
        assert_eq!(
            unique.len(),
            all_names.len(),
            "every bare member name must be unique across all eleven sets, \
             or value_of's unqualified lookup is ambiguous"
        );
    }
}
