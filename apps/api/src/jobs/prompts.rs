//! Prompt templates for posting analysis. Placeholders use `{name}` and are filled with `str::replace`.

/// Field extraction with a relaxed schema.
pub const DETAILED_EXTRACTION_PROMPT: &str = r#"SEN BİR VERİ AYIKLAMA SİSTEMİSİN. Aşağıdaki iş ilanı metninden istenen alanları kesinlikle ayıkla ve SADECE JSON döndür.

ÖZELLİKLE ŞU ÜÇ BİLGİYİ METİN İÇİNDEN BUL:
1. location: Şehir/İlçe bilgisi.
2. workType: Hibrit, Uzaktan (Remote), Tam Zamanlı gibi çalışma modeli.
3. experienceLevel: Stajyer, Junior, Senior gibi deneyim beklentisi.

ANALİZ EDİLECEK METİN:
{text}

DOLDURULACAK JSON ŞEMASI (Asla açıklama yapma, sadece JSON):
{
  "position": "İş başlığı",
  "company": "Şirket adı",
  "location": "Konum bilgisi (örn: İstanbul, Türkiye)",
  "workType": "Çalışma modeli (örn: Hibrit veya Remote)",
  "experienceLevel": "Aranan tecrübe (örn: 0-2 Yıl veya Stajyer)",
  "educationLevel": "Eğitim kriteri",
  "technicalSkills": ["skill1", "skill2"],
  "responsibilities": ["görev1", "görev2"],
  "summary": "İşin 2 cümlelik özeti"
}"#;

/// Strict extraction including military status, languages and salary.
pub const UNIVERSAL_EXTRACTION_PROMPT: &str = r#"SEN KIDEMLI BIR TEKNIK RECRUITER + IS ANALISTISIN.
Asagidaki is ilanini analiz et ve SADECE JSON DONDUR.
JSON DISINDA HICBIR SEY YAZMA. Markdown yok. Kod blogu yok.

JSON SCHEMA:
{
  "position": "...",
  "company": "...",
  "location": "...",
  "workType": "...",
  "experienceLevel": "...",
  "educationLevel": "...",
  "militaryStatus": "...",
  "languages": ["..."],
  "salary": "...",
  "summary": "...",
  "technicalSkills": ["..."],
  "responsibilities": ["..."]
}

IS ILANI METNI:
{text}
"#;

/// Markdown recruiter report comparing the candidate with the posting.
pub const RECRUITER_REPORT_PROMPT: &str = r#"SEN DÜNYA STANDARTLARINDA BİR KIDEMLİ TEKNİK RECRUITER VE STRATEJİK İŞ ANALİSTİSİN.
Görevin, adayın profilini iş ilanıyla anlamsal olarak karşılaştırmaktır.

### ANALİZ TALİMATLARI:
1. Derin Karşılaştırma: Adayın deneyimlerindeki sorumlulukları ilandaki sorumluluklarla eşleştir.
2. Kritiklik Seviyesi: İlandaki teknolojileri "Kritik", "Destekleyici" ve "Yumuşak Beceriler" olarak sınıflandır.
3. Dil ve Kültür: Adayın dil seviyesinin ilandaki ihtiyaçları karşılayıp karşılamadığını yorumla.
4. Çıkarım Yap: Deneyimden açıkça anlaşılan yetkinlikleri "Tecrübeden çıkarılmıştır" notuyla eşleşenlere ekle.
5. Gruplama Yap: Benzer araçları stratejik başlıklar altında birleştir.
6. Skorlama: 100 üzerinden bir 'Yeterlilik Skoru' belirle.

---
### ÇIKTI FORMATI:

### 📊 Detaylı Teknik Uyumluluk Analizi
- [Stratejik Yorum]: En az 5 cümlelik, teknik derinliği olan bir paragraf.
- [ATS Puanı Tahmini]: 100 üzerinden bir uyum skoru ve nedeni.

### ✅ Eşleşen Teknik Yetkinlikler ve Deneyim Transferi
- (En az 6 detaylı madde)

### ⚠️ Kritik Yetkinlik Boşlukları ve Operasyonel Riskler
- (En az 6 detaylı madde)

### 💡 Mülakat İçin Teknik Soru Önerileri
- (3 teknik soru)

### 🎯 Teknik Sonuç ve Başvuru Durumu
- **DURUM:** [UYGUN / KISMEN UYGUN / RİSKLİ / UYGUN DEĞİL]
- **GEREKÇE:** (Nihai profesyonel karar özeti.)
---

[Aday Profili]
{profile}

[İş İlanı]
{posting}
"#;
