//! Keyword-driven weather assistant.
//!
//! A question is matched against topics in order; the first topic whose
//! keyword appears wins. Within a topic the rules are tried top to bottom and
//! the first whose weather predicate holds produces the answer. Keyword sets
//! overlap (`산책` is both an outing and an exercise word), so both orders
//! are significant.

use crate::model::WeatherReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Outing,
    Laundry,
    Exercise,
    Umbrella,
    Clothing,
    Driving,
    General,
}

impl Topic {
    /// Evaluation order.
    pub const ALL: [Topic; 7] = [
        Topic::Outing,
        Topic::Laundry,
        Topic::Exercise,
        Topic::Umbrella,
        Topic::Clothing,
        Topic::Driving,
        Topic::General,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Outing => &["소풍", "나들이", "놀러", "여행", "데이트", "산책", "외출"],
            Topic::Laundry => &["빨래", "세탁", "말리기", "건조"],
            Topic::Exercise => &["운동", "조깅", "러닝", "산책", "자전거", "헬스"],
            Topic::Umbrella => &["우산", "비", "rain", "비올"],
            Topic::Clothing => &["옷", "입을", "차림", "패션", "코디"],
            Topic::Driving => &["드라이브", "운전", "차"],
            Topic::General => &["날씨", "어때", "어떨까", "좋아", "괜찮"],
        }
    }

    /// First topic with a keyword contained in the (already normalized)
    /// question.
    pub fn detect(question: &str) -> Option<Topic> {
        Topic::ALL
            .into_iter()
            .find(|t| t.keywords().iter().any(|k| question.contains(k)))
    }
}

struct Rule {
    topic: Topic,
    when: fn(&WeatherReading) -> bool,
    reply: fn(&WeatherReading) -> String,
}

fn always(_: &WeatherReading) -> bool {
    true
}

#[rustfmt::skip]
static RULES: &[Rule] = &[
    // Outing
    Rule { topic: Topic::Outing, when: |w| (18.0..=28.0).contains(&w.temperature) && w.is_clear(),
        reply: |w| format!("🎯 **완벽해요!** {}는 {}°C로 {} 날씨예요! 소풍가기 최고의 날이에요! ☀️", w.city, w.temperature, w.description) },
    Rule { topic: Topic::Outing, when: |w| (15.0..=30.0).contains(&w.temperature) && !w.is_rainy(),
        reply: |w| format!("😊 **좋아요!** {}는 {}°C예요. {} 날씨지만 나들이하기 괜찮아요!", w.city, w.temperature, w.description) },
    Rule { topic: Topic::Outing, when: WeatherReading::is_rainy,
        reply: |w| format!("☔ **아쉬워요...** {}에 비가 와요. 실내 활동은 어떨까요?", w.city) },
    Rule { topic: Topic::Outing, when: always,
        reply: |w| format!("🤔 **글쎄요...** {}는 {}°C로 {} 날씨예요. 옷을 따뜻하게 입고 가세요!", w.city, w.temperature, w.description) },

    // Laundry
    Rule { topic: Topic::Laundry, when: |w| w.humidity_pct < 60 && !w.is_rainy() && w.wind_speed > 1.0,
        reply: |w| format!("👍 **네! 완벽해요!** {}는 습도 {}%, 바람 {}m/s로 빨래 말리기 최고예요! 🌬️", w.city, w.humidity_pct, w.wind_speed) },
    Rule { topic: Topic::Laundry, when: |w| w.humidity_pct < 70 && !w.is_rainy(),
        reply: |w| format!("✅ **괜찮아요!** {}는 습도 {}%로 빨래 말리기에 나쁘지 않아요!", w.city, w.humidity_pct) },
    Rule { topic: Topic::Laundry, when: WeatherReading::is_rainy,
        reply: |w| format!("❌ **안돼요!** {}에 비가 와요. 실내에서 말리세요! ☔", w.city) },
    Rule { topic: Topic::Laundry, when: always,
        reply: |w| format!("😐 **별로예요...** {}는 습도 {}%로 높아요. 실내 건조가 나을 것 같아요.", w.city, w.humidity_pct) },

    // Exercise
    Rule { topic: Topic::Exercise, when: |w| (15.0..=25.0).contains(&w.temperature) && !w.is_rainy(),
        reply: |w| format!("💪 **완벽한 운동 날씨!** {}는 {}°C로 운동하기 딱 좋아요! 🏃‍♂️", w.city, w.temperature) },
    Rule { topic: Topic::Exercise, when: |w| w.temperature > 30.0,
        reply: |w| format!("🌡️ **너무 더워요!** {}는 {}°C예요. 이른 아침이나 저녁에 운동하세요!", w.city, w.temperature) },
    Rule { topic: Topic::Exercise, when: |w| w.temperature < 10.0,
        reply: |w| format!("🧥 **추워요!** {}는 {}°C예요. 실내 운동이 좋겠어요!", w.city, w.temperature) },
    Rule { topic: Topic::Exercise, when: WeatherReading::is_rainy,
        reply: |w| format!("☔ **비가 와서 아쉬워요!** {}에 비가 와요. 실내 운동은 어떨까요?", w.city) },
    Rule { topic: Topic::Exercise, when: always,
        reply: |w| format!("🤔 **적당해요!** {}는 {}°C, {} 날씨예요. 가벼운 운동은 괜찮아요!", w.city, w.temperature, w.description) },

    // Umbrella
    Rule { topic: Topic::Umbrella, when: WeatherReading::is_rainy,
        reply: |w| format!("☂️ **네! 꼭 챙기세요!** {}에 비가 와요. 우산 필수예요!", w.city) },
    Rule { topic: Topic::Umbrella, when: always,
        reply: |w| format!("☀️ **아니요!** {}는 {} 날씨예요. 우산 없어도 괜찮아요!", w.city, w.description) },

    // Clothing
    Rule { topic: Topic::Clothing, when: |w| w.temperature < 5.0,
        reply: |w| format!("🧥 **두꺼운 패딩!** {}는 {}°C로 매우 추워요. 목도리, 장갑도 필수!", w.city, w.temperature) },
    Rule { topic: Topic::Clothing, when: |w| w.temperature < 10.0,
        reply: |w| format!("🧥 **따뜻한 외투!** {}는 {}°C예요. 코트나 두꺼운 재킷 추천!", w.city, w.temperature) },
    Rule { topic: Topic::Clothing, when: |w| w.temperature < 15.0,
        reply: |w| format!("👔 **가디건이나 자켓!** {}는 {}°C로 선선해요. 얇은 겉옷 추천!", w.city, w.temperature) },
    Rule { topic: Topic::Clothing, when: |w| w.temperature < 20.0,
        reply: |w| format!("👕 **긴팔 티셔츠!** {}는 {}°C로 쾌적해요. 가벼운 옷 좋아요!", w.city, w.temperature) },
    Rule { topic: Topic::Clothing, when: |w| w.temperature < 25.0,
        reply: |w| format!("👕 **반팔도 OK!** {}는 {}°C로 따뜻해요. 편한 옷차림!", w.city, w.temperature) },
    Rule { topic: Topic::Clothing, when: always,
        reply: |w| format!("🩳 **시원하게!** {}는 {}°C로 더워요. 반팔, 반바지 추천!", w.city, w.temperature) },

    // Driving
    Rule { topic: Topic::Driving, when: WeatherReading::is_foggy,
        reply: |w| format!("🌫️ **주의하세요!** {}에 안개가 있어요. 서행 운전 필수!", w.city) },
    Rule { topic: Topic::Driving, when: WeatherReading::is_rainy,
        reply: |w| format!("☔ **조심히 가세요!** {}에 비가 와요. 미끄러운 도로 주의!", w.city) },
    Rule { topic: Topic::Driving, when: |w| w.wind_speed > 7.0,
        reply: |w| format!("💨 **바람이 강해요!** {}는 바람 {}m/s예요. 핸들 꽉 잡으세요!", w.city, w.wind_speed) },
    Rule { topic: Topic::Driving, when: always,
        reply: |w| format!("🚗 **좋은 드라이브 날씨!** {}는 {}°C, {} 날씨예요. 안전운전!", w.city, w.temperature, w.description) },

    // General
    Rule { topic: Topic::General, when: |w| (20.0..=25.0).contains(&w.temperature) && w.is_clear(),
        reply: |w| format!("**최고의 날씨!** {}는 {}°C, {}로 완벽해요!", w.city, w.temperature, w.description) },
    Rule { topic: Topic::General, when: |w| (15.0..=28.0).contains(&w.temperature) && !w.is_rainy(),
        reply: |w| format!("😊 **좋은 날씨!** {}는 {}°C, {}로 괜찮아요!", w.city, w.temperature, w.description) },
    Rule { topic: Topic::General, when: WeatherReading::is_rainy,
        reply: |w| format!("☔ **비 오는 날이에요!** {}는 {}°C, {} 날씨예요.", w.city, w.temperature, w.description) },
    Rule { topic: Topic::General, when: always,
        reply: |w| format!("🌤️ **평범한 날씨!** {}는 {}°C, {} 날씨예요.", w.city, w.temperature, w.description) },
];

pub const NO_WEATHER_REPLY: &str = "😔 죄송해요, 날씨 정보를 먼저 조회해주세요!";

pub const EXAMPLE_QUESTIONS: [&str; 4] = [
    "소풍 가도 될까요?",
    "빨래 말리기 좋나요?",
    "운동하기 어때요?",
    "무슨 옷 입을까요?",
];

/// Answer a free-text question about the given conditions.
pub fn answer(question: &str, weather: Option<&WeatherReading>) -> Vec<String> {
    let Some(w) = weather else {
        return vec![NO_WEATHER_REPLY.to_string()];
    };

    let question = question.trim().to_lowercase();

    let reply = Topic::detect(&question).and_then(|topic| {
        RULES
            .iter()
            .filter(|rule| rule.topic == topic)
            .find(|rule| (rule.when)(w))
            .map(|rule| (rule.reply)(w))
    });

    match reply {
        Some(line) => vec![line],
        None => not_understood(w),
    }
}

fn not_understood(w: &WeatherReading) -> Vec<String> {
    let mut lines = vec![
        format!(
            "🤔 **음... 잘 이해 못했어요!** {}는 현재 {}°C, {} 날씨예요. 더 구체적으로 질문해주세요!",
            w.city, w.temperature, w.description
        ),
        "**이런 질문을 해보세요:**".to_string(),
    ];
    lines.extend(EXAMPLE_QUESTIONS.iter().map(|q| format!("• '{q}'")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::demo_reading;

    fn with(temp: f64, description: &str, humidity: u8, wind: f64) -> WeatherReading {
        let mut w = demo_reading("seoul").expect("seoul");
        w.temperature = temp;
        w.description = description.into();
        w.humidity_pct = humidity;
        w.wind_speed = wind;
        w
    }

    #[test]
    fn no_weather_asks_for_lookup_first() {
        assert_eq!(answer("소풍 가도 될까요?", None), vec![NO_WEATHER_REPLY]);
    }

    #[test]
    fn every_topic_always_has_an_answer() {
        let readings = [
            with(-50.0, "", 100, 0.0),
            with(22.0, "맑음", 40, 3.0),
            with(40.0, "비", 95, 12.0),
        ];
        for topic in Topic::ALL {
            for w in &readings {
                assert!(
                    RULES.iter().any(|r| r.topic == topic && (r.when)(w)),
                    "{topic:?} has no rule for {}°C {}",
                    w.temperature,
                    w.description
                );
            }
        }
    }

    #[test]
    fn outing_on_clear_mild_day_is_perfect() {
        let reply = answer("내일 소풍 가도 될까요?", Some(&with(22.0, "맑음", 50, 2.0)));
        assert_eq!(reply.len(), 1);
        assert!(reply[0].starts_with("🎯 **완벽해요!**"), "{}", reply[0]);
        assert!(reply[0].contains("Seoul는 22°C로 맑음"));
    }

    #[test]
    fn outing_in_rain_suggests_indoors() {
        let reply = answer("나들이 갈까?", Some(&with(12.8, "비", 78, 4.2)));
        assert!(reply[0].contains("실내 활동"));
    }

    #[test]
    fn walking_is_an_outing_question_not_exercise() {
        let w = with(20.0, "구름조금", 60, 2.0);
        let reply = answer("산책 괜찮을까?", Some(&w));
        assert!(reply[0].starts_with("😊 **좋아요!**"), "{}", reply[0]);
    }

    #[test]
    fn laundry_rules_in_order() {
        let dry = answer("빨래 말리기 좋나요?", Some(&with(20.0, "맑음", 50, 2.0)));
        assert!(dry[0].starts_with("👍"));

        let calm = answer("빨래 말리기 좋나요?", Some(&with(20.0, "맑음", 50, 0.5)));
        assert!(calm[0].starts_with("✅"));

        let wet = answer("세탁해도 될까", Some(&with(20.0, "비", 90, 2.0)));
        assert!(wet[0].starts_with("❌"));

        let humid = answer("건조 잘 될까", Some(&with(20.0, "흐림", 85, 2.0)));
        assert!(humid[0].starts_with("😐"));
    }

    #[test]
    fn laundry_beats_general_keywords() {
        // 좋아 is also a general keyword.
        let reply = answer("빨래 좋아?", Some(&with(20.0, "맑음", 50, 2.0)));
        assert!(reply[0].contains("빨래"));
    }

    #[test]
    fn exercise_temperature_bands() {
        for (question, temp, description, marker) in [
            ("운동하기 어때요?", 20.0, "맑음", "💪"),
            ("조깅", 33.0, "맑음", "🌡️"),
            ("헬스", 5.0, "맑음", "🧥"),
            ("러닝", 20.0, "비", "☔"),
            ("자전거", 27.0, "흐림", "🤔"),
        ] {
            let reply = answer(question, Some(&with(temp, description, 50, 2.0)));
            assert!(reply[0].starts_with(marker), "{question}: {}", reply[0]);
        }
    }

    #[test]
    fn umbrella_question_matches_english_keyword() {
        let reply = answer("Will it RAIN?", Some(&with(12.0, "비", 80, 3.0)));
        assert!(reply[0].starts_with("☂️"));
        let reply = answer("우산 필요해?", Some(&with(18.5, "구름조금", 65, 2.5)));
        assert!(reply[0].starts_with("☀️ **아니요!**"));
    }

    #[test]
    fn clothing_follows_temperature_ladder() {
        let cases = [
            (0.0, "두꺼운 패딩"),
            (7.0, "따뜻한 외투"),
            (12.0, "가디건이나 자켓"),
            (18.0, "긴팔 티셔츠"),
            (23.0, "반팔도 OK"),
            (29.0, "시원하게"),
        ];
        for (temp, expected) in cases {
            let reply = answer("무슨 옷 입을까요?", Some(&with(temp, "맑음", 50, 1.0)));
            assert!(reply[0].contains(expected), "{temp}: {}", reply[0]);
        }
    }

    #[test]
    fn driving_prefers_fog_over_rain_and_wind() {
        let reply = answer("드라이브 갈까", Some(&with(15.0, "안개 비", 90, 9.0)));
        assert!(reply[0].starts_with("🌫️"));
        let reply = answer("운전 괜찮아?", Some(&with(15.0, "맑음", 50, 9.0)));
        assert!(reply[0].starts_with("💨"));
    }

    #[test]
    fn general_question_falls_through_to_general_rules() {
        let reply = answer("오늘 날씨 어때?", Some(&with(22.0, "맑음", 50, 2.0)));
        assert!(reply[0].starts_with("**최고의 날씨!**"));
        let reply = answer("오늘 날씨 어때?", Some(&with(5.0, "흐림", 50, 2.0)));
        assert!(reply[0].starts_with("🌤️"));
    }

    #[test]
    fn unknown_question_lists_examples() {
        let reply = answer("주식 살까요?", Some(&with(18.5, "구름조금", 65, 2.5)));
        assert_eq!(reply.len(), 6);
        assert!(reply[0].contains("잘 이해 못했어요"));
        assert_eq!(reply[2], "• '소풍 가도 될까요?'");
    }
}
