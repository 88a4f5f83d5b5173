//! The ccTalk standard command set.
//!
//! ccTalk calls command codes "headers"; they occupy one byte, with the
//! well-known commands clustered at the top of the range and the core
//! bus-management commands at the bottom. Codes in between are reserved or
//! manufacturer-specific, so the table is deliberately partial: absence maps
//! to the [`UNHANDLED`] fallback, never to an error.

/// Description returned for command codes missing from the table.
pub const UNHANDLED: &str = "Unhandled";

/// Look up the human-readable description of a command code.
///
/// Total over all of `u8`; codes outside the standard set yield
/// [`UNHANDLED`].
pub fn describe(command: u8) -> &'static str {
    match command {
        // Core commands and reply headers
        0 => "Reply",
        1 => "Reset device",
        2 => "Request comms status variables",
        3 => "Clear comms status variables",
        4 => "Request comms revision",
        5 => "NAK message",
        6 => "Busy message",

        // Multi-drop addressing and polling
        255 => "Factory set-up and test",
        254 => "Simple poll",
        253 => "Address poll",
        252 => "Address clash",
        251 => "Address change",
        250 => "Address random",
        249 => "Request polling priority",
        248 => "Request status",
        247 => "Request variable set",

        // Identification
        246 => "Request manufacturer id",
        245 => "Request equipment category id",
        244 => "Request product code",
        243 => "Request database version",
        242 => "Request serial number",
        241 => "Request software revision",
        192 => "Request build code",

        // Diagnostics and low-level I/O
        240 => "Test solenoids",
        239 => "Operate motors",
        238 => "Test output lines",
        237 => "Read input lines",
        236 => "Read opto states",
        235 => "Read last credit or error code",
        234 => "Issue guard code",
        233 => "Latch output lines",
        232 => "Perform self-check",

        // Coin acceptance
        231 => "Modify inhibit status",
        230 => "Request inhibit status",
        229 => "Read buffered credit or error codes",
        228 => "Modify master inhibit status",
        227 => "Request master inhibit status",
        226 => "Request insertion counter",
        225 => "Request accept counter",

        // Sorter control
        223 => "Modify sorter override status",
        222 => "Request sorter override status",
        212 => "Modify default sorter path",
        211 => "Request default sorter path",
        210 => "Modify payout absolute count",
        209 => "Request payout absolute count",
        189 => "Modify sorter paths",
        188 => "Request sorter paths",

        // Security and configuration
        219 => "Enter new PIN number",
        218 => "Enter PIN number",
        204 => "Meter control",
        203 => "Display control",
        202 => "Teach mode control",
        201 => "Request teach status",
        199 => "Configuration to EEPROM",
        198 => "Counters to EEPROM",
        197 => "Calculate ROM checksum",
        196 => "Request creation date",
        195 => "Request last modification date",
        194 => "Request reject counter",
        193 => "Request fraud counter",
        187 => "Modify coin id",
        186 => "Request coin id",
        185 => "Upload window data",
        184 => "Download calibration info",
        183 => "Modify security setting",
        182 => "Request security setting",
        181 => "Modify bank select",
        180 => "Request bank select",
        179 => "Handheld function",
        178 => "Request alarm counter",

        // Payout hoppers
        177 => "Modify payout float",
        176 => "Request payout float",
        175 => "Request thermistor reading",
        172 => "Emergency stop",
        171 => "Request hopper coin",
        170 => "Request base year",
        169 => "Request address mode",
        168 => "Request hopper dispense count",
        167 => "Dispense hopper coins",
        166 => "Request hopper status",
        165 => "Modify variable set",
        164 => "Enable hopper",
        163 => "Test hopper",
        134 => "Dispense hopper value",
        133 => "Request hopper polling value",
        132 => "Emergency stop value",
        131 => "Request hopper coin value",
        130 => "Request indexed hopper dispense count",

        // Encryption
        161 => "Pump RNG",
        160 => "Request cipher key",
        137 => "Switch encryption code",
        136 => "Store encryption code",

        // Bill validators
        159 => "Read buffered bill events",
        158 => "Modify bill id",
        157 => "Request bill id",
        156 => "Request country scaling factor",
        155 => "Request bill position",
        154 => "Route bill",
        153 => "Modify bill operating mode",
        152 => "Request bill operating mode",
        151 => "Test lamps",
        150 => "Request individual accept counter",
        149 => "Request individual error counter",
        148 => "Read opto voltages",
        147 => "Perform stacker cycle",
        146 => "Operate bi-directional motors",
        145 => "Request currency revision",
        144 => "Upload bill tables",
        143 => "Begin bill table upgrade",
        142 => "Finish bill table upgrade",
        135 => "Set accept limit",

        // Firmware upgrade
        141 => "Request firmware upgrade capability",
        140 => "Upload firmware",
        139 => "Begin firmware upgrade",
        138 => "Finish firmware upgrade",

        // Miscellaneous
        129 => "Read barcode data",
        116 => "Modify real time clock",
        115 => "Request real time clock",
        113 => "Switch baud rate",
        104 => "Request service status",

        _ => UNHANDLED,
    }
}
