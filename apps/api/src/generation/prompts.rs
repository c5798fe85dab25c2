// Prompt templates for CV generation. Placeholders in braces are replaced before sending.

/// Shared body of the five tailored summaries. Replace `{profile}` and `{job}`.
pub const SUMMARY_PROMPT: &str = r#"SEN PROFESYONEL BİR CV YAZARISIN. Aşağıdaki adayın CV'sini ve iş ilanını analiz ederek,
ATS (Applicant Tracking System) uyumlu, profesyonel bir CV özeti yaz.

KRİTİK KURALLAR:
1. Metin TAMAMEN DOĞAL ve İNSAN YAZISI gibi görünmeli - hiçbir AI kalıntısı olmamalı
2. "AI", "yapay zeka", "oluşturuldu", "üretildi" gibi ifadeler KESİNLİKLE kullanma
3. Birinci tekil şahıs kullan (ben, bana, benim)
4. İlk 2 özet için EN AZ 15 CÜMLE yaz, diğerleri için en az 10, en fazla 12 cümle
5. Her cümle anlamlı ve profesyonel olsun
6. İş ilanındaki gereksinimleri CV'deki deneyimlerle eşleştir
7. Teknik terimleri doğal bir şekilde kullan
8. Metin akıcı ve okunabilir olsun

YAZIM TARZI:
- Profesyonel ama samimi
- Somut başarılar ve deneyimler vurgula
- İş ilanındaki anahtar kelimeleri doğal bir şekilde kullan
- Fazla tekrar yapma
- Detaylı ve kapsamlı açıklamalar yap

[ADAY CV BİLGİLERİ]
{profile}

[İŞ İLANI BİLGİLERİ]
{job}

LÜTFEN SADECE ÖZET METNİNİ YAZ, başlık, açıklama veya ek bilgi ekleme."#;

/// One angle per AI summary, appended as "ÖZEL TALİMAT".
pub const SUMMARY_PERSPECTIVES: [&str; 5] = [
    "Teknik yetkinlikler ve deneyimler üzerine odaklan - EN AZ 15 CÜMLE yaz",
    "Proje yönetimi ve liderlik deneyimlerini vurgula - EN AZ 15 CÜMLE yaz",
    "Problem çözme ve inovasyon yeteneklerini öne çıkar - En az 10 cümle yaz",
    "Takım çalışması ve iletişim becerilerini vurgula - En az 10 cümle yaz",
    "Kariyer gelişimi ve öğrenme isteğini öne çıkar - En az 10 cümle yaz",
];

/// Two-sentence experience description. Replace `{details}`, `{job_skills}` and `{emphasis}`.
pub const EXPERIENCE_PROMPT: &str = r#"SEN PROFESYONEL BİR CV YAZARISIN. Aşağıdaki iş deneyimini profesyonel bir dille açıkla.

KURALLAR:
1. SADECE 2 CÜMLE yaz - ne eksik ne fazla.
2. Birinci şahıs kullan (yaptım, geliştirdim, çalıştım, uyguladım, yönettim).
3. Her seferinde FARKLI ve YARATICI bir dil kullan - aynı kalıpları tekrarlama.
4. İlk cümlede görevi, sorumlulukları ve yapılan işleri anlat.
5. İkinci cümlede MUTLAKA kullanılan teknolojileri/becerileri belirt ve başarıları vurgula.
6. Cümleleri çeşitlendir - farklı fiiller, farklı yapılar kullan.
7. JSON, markdown, liste veya başlık kullanma.
8. Tamamen doğal, insan yazısı gibi görünmeli - AI kalıntısı olmamalı.

ÖRNEK FORMAT:
"Spring Boot ve PostgreSQL teknolojilerini kullanarak e-ticaret platformunun backend geliştirmesinde aktif rol aldım. Bu süreçte RESTful API tasarımı yaparak sistem performansını %30 artırdım ve mikroservis mimarisi uyguladım."

DENEYİM DETAYI:
{details}

İSTENEN BECERİLER:
{job_skills}{emphasis}

SADECE 2 CÜMLE YAZ - başka hiçbir şey ekleme."#;

/// Two-sentence project description. Same placeholders as `EXPERIENCE_PROMPT`.
pub const PROJECT_PROMPT: &str = r#"SEN PROFESYONEL BİR CV YAZARISIN. Aşağıdaki projeyi profesyonel bir dille açıkla.

KURALLAR:
1. SADECE 2 CÜMLE yaz - ne eksik ne fazla.
2. Birinci şahıs kullan (geliştirdim, tasarladım, uyguladım, kodladım, test ettim).
3. Her seferinde FARKLI ve YARATICI bir dil kullan - aynı kalıpları tekrarlama.
4. İlk cümlede projenin amacını, kapsamını ve yapılan işleri anlat.
5. İkinci cümlede MUTLAKA kullanılan teknolojileri/becerileri belirt ve sonuçları vurgula.
6. Cümleleri çeşitlendir - farklı fiiller, farklı yapılar kullan.
7. JSON, markdown, liste veya başlık kullanma.
8. Tamamen doğal, insan yazısı gibi görünmeli - AI kalıntısı olmamalı.

ÖRNEK FORMAT:
"React ve Node.js kullanarak kullanıcı yönetim sistemi geliştirdim. Projede JWT authentication uygulayarak güvenli API endpoint'leri oluşturdum ve responsive tasarım ile kullanıcı deneyimini iyileştirdim."

PROJE DETAYI:
{details}

İSTENEN BECERİLER:
{job_skills}{emphasis}

SADECE 2 CÜMLE YAZ - başka hiçbir şey ekleme."#;

/// Rewrites user-entered text without changing its meaning. Append the text.
pub const GRAMMAR_FIX_PROMPT: &str = "Aşağıdaki metni anlamını bozmadan profesyonel bir dille ve imla kurallarına uygun olarak düzelt. \
Metni daha akıcı ve doğal hale getir, ancak anlamını koru. \
SADECE düzeltilmiş metni döndür, başka açıklama, ön ek veya ek bilgi ekleme:\n\n";

/// Replace `{title}`.
pub const CAREER_ADVICE_PROMPT: &str =
    "Kariyer danışmanı olarak '{title}' pozisyonu için trendleri ve gelişim önerilerini Türkçe maddeler halinde yaz.";

/// Replace `{language}` and `{json}`.
pub const TRANSLATION_PROMPT: &str = "You are an expert CV translator. Translate the JSON values into {language}. \
STRICT RULES:\n\
1) Do not change JSON structure. Only translate string values.\n\
2) Keep technical terms (e.g., Java, Spring, AWS) and company names unchanged.\n\
3) Do not modify id, email, phone, linkedinUrl, URLs or date fields.\n\
4) Return ONLY valid JSON (no markdown, no backticks).\n\nINPUT_JSON:\n{json}";
