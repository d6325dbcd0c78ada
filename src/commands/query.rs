//! Query (read-only) command handlers.

use super::CommandResult;
use razer_keyboard::KeyboardController;

/// Show device type, serial number and firmware version
pub async fn info(keyboard: &KeyboardController) -> CommandResult {
    let info = keyboard.get_device_info().await?;
    println!("Device:   {}", keyboard.device_folder_name());
    println!("Type:     {}", info.device_type);
    println!("Serial:   {}", info.serial);
    println!("Firmware: {}", info.firmware_version);
    Ok(())
}
