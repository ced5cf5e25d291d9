use atc_voice_control_rs::{ResultKind, VoiceControlConfig, VoiceControlSession, test_utils};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match VoiceControlConfig::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load voice control config: {}", e);
            eprintln!("Make sure the file 'resources/config/voice_control.ron' exists.");
            return Err(e.into());
        }
    };

    let mut session = VoiceControlSession::new(config)?;

    let demos = [
        (
            "en-US",
            test_utils::grammar_source(&["09", "27L"])?,
            test_utils::sample_rules(),
            vec![
                "Delta one two three status",
                "United four five six runway two seven left cleared for takeoff",
                "Speedbird niner zero one runway zero nine cleared to land",
                "Delta one two three turn heading three six zero",
                "United seven seven seven proceed direct New York",
                "Delta one two three proceed to waypoint hotel four two",
                "Delta one two three climb and maintain flight level three five zero",
            ],
        ),
        (
            "zh-CN",
            test_utils::mandarin_source(&[])?,
            test_utils::mandarin_rules(),
            vec![
                "国航幺两三报告位置",
                "东航四五六 跑道两拐左 可以起飞",
                "南航拐拐拐直飞航路点探戈四两",
            ],
        ),
    ];

    for (locale, source, rules, utterances) in demos {
        let compiled = session.reconfigure(source, rules, locale)?;
        println!("Compiled {} grammars for {}:", compiled.len(), locale);
        for grammar in compiled.iter() {
            println!("  {} = {}", grammar.name, grammar.rule);
        }
        println!();

        for utterance in utterances {
            println!("Input: \"{}\"", utterance);
            let result = session.decode_transcript(utterance)?;
            match result.kind {
                ResultKind::Recognized => {
                    println!("  ✓ {} \"{}\"", result.grammar, result.normalized_message);
                    match result.to_command() {
                        Some(command) => println!("    Command: {:?}", command),
                        None => println!("    Incomplete fields: {:?}", result),
                    }
                }
                _ => println!("  ✗ No grammar matched"),
            }
            println!();
        }
    }

    Ok(())
}
