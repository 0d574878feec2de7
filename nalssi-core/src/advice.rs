//! Everyday advice and diary mood options derived from the current
//! conditions.

use crate::model::WeatherReading;

/// Mood choices offered by the diary when no weather is known.
pub const DEFAULT_MOODS: [&str; 6] = [
    "😊 좋음",
    "😐 보통",
    "😔 별로",
    "😴 피곤함",
    "😆 즐거움",
    "😤 짜증남",
];

fn temperature_line(temp: f64) -> &'static str {
    match temp {
        t if t < 5.0 => "🧥 **두꺼운 외투 필수!** 매우 춥습니다.",
        t if t < 10.0 => "🧥 **따뜻한 외투를 챙기세요!** 쌀쌀합니다.",
        t if t < 15.0 => "👕 **얇은 겉옷이 좋겠어요.** 선선합니다.",
        t if t < 20.0 => "👔 **적당한 옷차림이 좋겠어요.** 쾌적한 날씨입니다.",
        t if t < 25.0 => "👕 **가벼운 옷이 편해요.** 따뜻한 날씨입니다.",
        t if t < 30.0 => "👕 **가벼운 옷차림을 추천!** 더워요.",
        _ => "🌞 **시원한 옷차림을 추천!** 매우 덥습니다.",
    }
}

fn condition_line(w: &WeatherReading) -> Option<&'static str> {
    let any = |needles: &[&str]| needles.iter().any(|n| w.description_has(n));

    if any(&["비", "rain"]) {
        Some("☂️ **우산을 꼭 챙기세요!** 비가 와요.")
    } else if any(&["눈", "snow"]) {
        Some("❄️ **미끄럼 주의!** 눈이 와요.")
    } else if any(&["맑", "clear"]) {
        Some("☀️ **야외활동하기 좋은 날이에요!** 맑아요.")
    } else if any(&["구름"]) {
        Some("☁️ **구름이 많아요.** 선선한 느낌이에요.")
    } else if any(&["흐림", "cloudy"]) {
        Some("☁️ **흐린 날씨예요.** 실내 활동이 좋겠어요.")
    } else if any(&["안개", "fog"]) {
        Some("🌫️ **운전시 주의하세요.** 시야가 흐려요.")
    } else {
        None
    }
}

/// Practical advice lines for the day. Never empty.
pub fn daily_advice(w: &WeatherReading) -> Vec<&'static str> {
    let mut advice = vec![temperature_line(w.temperature)];
    advice.extend(condition_line(w));

    if w.humidity_pct > 80 {
        advice.push("💧 **습도가 높아요.** 불쾌할 수 있어요.");
    } else if w.humidity_pct < 30 {
        advice.push("🏺 **습도가 낮아요.** 수분 보충 필요!");
    }

    if w.wind_speed > 5.0 {
        advice.push("💨 **바람이 강해요.** 우산보다 우비가 좋겠어요.");
    }

    if (20.0..=25.0).contains(&w.temperature) && w.humidity_pct < 70 && w.is_clear() {
        advice.push("🎯 **완벽한 날씨!** 나들이하기 최고예요!");
    }

    advice
}

/// Mood options for a diary entry under the given conditions.
pub fn mood_suggestions(weather: Option<&WeatherReading>) -> Vec<&'static str> {
    let Some(w) = weather else {
        return vec!["😊 좋음", "😐 보통", "😔 별로"];
    };

    if w.description_has("맑") || w.description_has("clear") {
        vec!["😊 상쾌함", "🌞 기분좋음", "✨ 활기참", "😊 좋음"]
    } else if w.description_has("비") || w.description_has("rain") {
        vec!["🌧️ 차분함", "💭 사색적", "😌 평온함", "😐 보통"]
    } else if w.description_has("구름") {
        vec!["☁️ 편안함", "😌 평온함", "💭 생각많음", "😊 좋음"]
    } else if w.temperature > 25.0 {
        vec!["🌞 활발함", "💦 더위먹음", "😅 땀남", "😊 좋음"]
    } else if w.temperature < 10.0 {
        vec!["🧊 추움", "☃️ 겨울느낌", "😌 포근함", "😊 좋음"]
    } else {
        vec!["😊 좋음", "😌 평온함", "💭 생각많음", "😐 보통"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::demo_reading;

    fn with(temp: f64, description: &str, humidity: u8, wind: f64) -> WeatherReading {
        let mut w = demo_reading("busan").expect("busan");
        w.temperature = temp;
        w.description = description.into();
        w.humidity_pct = humidity;
        w.wind_speed = wind;
        w
    }

    #[test]
    fn perfect_day_gets_five_star_line() {
        let advice = daily_advice(&with(22.0, "맑음", 50, 2.0));
        assert_eq!(
            advice,
            vec![
                "👕 **가벼운 옷이 편해요.** 따뜻한 날씨입니다.",
                "☀️ **야외활동하기 좋은 날이에요!** 맑아요.",
                "🎯 **완벽한 날씨!** 나들이하기 최고예요!",
            ]
        );
    }

    #[test]
    fn stormy_cold_day_stacks_warnings() {
        let advice = daily_advice(&with(3.0, "강한 비", 90, 8.0));
        assert_eq!(advice.len(), 4);
        assert!(advice[0].contains("두꺼운 외투"));
        assert!(advice[1].contains("우산"));
        assert!(advice[2].contains("습도가 높아요"));
        assert!(advice[3].contains("바람이 강해요"));
    }

    #[test]
    fn rain_wins_over_cloud_in_condition_line() {
        let advice = daily_advice(&with(15.0, "구름 많고 비", 60, 1.0));
        assert!(advice[1].contains("우산"));
    }

    #[test]
    fn unknown_condition_still_yields_temperature_line() {
        let advice = daily_advice(&with(35.0, "황사", 50, 1.0));
        assert_eq!(advice, vec!["🌞 **시원한 옷차림을 추천!** 매우 덥습니다."]);
    }

    #[test]
    fn dry_air_is_flagged() {
        let advice = daily_advice(&with(12.0, "흐림", 20, 1.0));
        assert!(advice.contains(&"🏺 **습도가 낮아요.** 수분 보충 필요!"));
    }

    #[test]
    fn moods_follow_conditions() {
        let moods = mood_suggestions(None);
        assert_eq!(moods, ["😊 좋음", "😐 보통", "😔 별로"]);

        for (temp, description, first) in [
            (20.0, "맑음", "😊 상쾌함"),
            (20.0, "Light rain", "🌧️ 차분함"),
            (20.0, "구름많음", "☁️ 편안함"),
            (28.0, "흐림", "🌞 활발함"),
            (2.0, "흐림", "🧊 추움"),
            (15.0, "흐림", "😊 좋음"),
        ] {
            let w = with(temp, description, 50, 1.0);
            assert_eq!(mood_suggestions(Some(&w))[0], first);
        }
    }
}
